use serde::{Deserialize, Serialize};

const fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Staff members that can take appointments.
pub fn active(staff: &[Staff]) -> Vec<Staff> {
    staff.iter().filter(|s| s.is_active).cloned().collect()
}
