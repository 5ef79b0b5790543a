use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Manager tables whose column visibility can be configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, EnumIter, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DashboardTable {
    Businesses,
    Employees,
    Departments,
    Priorities,
    Statistics,
}

/// Visible columns of one table, passed explicitly to the view layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ColumnPreferences {
    #[garde(skip)]
    pub table: DashboardTable,

    #[garde(length(min = 1), inner(length(min = 1, max = 64)))]
    pub visible: Vec<String>,
}

impl ColumnPreferences {
    pub fn defaults(table: DashboardTable) -> Self {
        let columns: &[&str] = match table {
            DashboardTable::Businesses => &["name", "owner", "phone", "ticketCount"],
            DashboardTable::Employees => &["name", "email", "department", "role", "active"],
            DashboardTable::Departments => &["name", "manager", "employeeCount"],
            DashboardTable::Priorities => &["name", "level", "color"],
            DashboardTable::Statistics => &["employee", "completed", "inProgress", "hoursLogged"],
        };
        Self {
            table,
            visible: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn all_defaults() -> Vec<Self> {
        DashboardTable::iter().map(Self::defaults).collect()
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|c| c == column)
    }
}
