use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

// Declaration order is severity order: Normal < Low < High < Critical.
str_enum!(LabStatus {
    Normal => "normal",
    Low => "low",
    High => "high",
    Critical => "critical",
});

str_enum!(AlertType {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

str_enum!(AlertPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

str_enum!(AlertCategory {
    LabResult => "lab_result",
    CardiovascularRisk => "cardiovascular_risk",
    Complication => "complication",
    Diet => "diet",
    DoctorNotification => "doctor_notification",
});

// Care-team role an alert is routed to.
str_enum!(TargetRole {
    Doctor => "doctor",
    Nutritionist => "nutritionist",
    WardNurse => "ward_nurse",
    PoliNurse => "poli_nurse",
    LabTechnician => "lab_technician",
});

// Care-team role whose screen captured the encounter.
str_enum!(OriginRole {
    WardNurse => "ward_nurse",
    PoliNurse => "poli_nurse",
    LabTechnician => "lab_technician",
    Doctor => "doctor",
});

impl LabStatus {
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
