//! Closed-set categorical attributes
//!
//! Each enum mirrors one selectbox on the quote form. Variant labels are the
//! exact strings the pipeline was trained on; the model's categorical
//! encoders match on these labels, so they must round-trip unchanged through
//! serde and [`as_str`](Gender::as_str).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every admissible value, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The training-data label for this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// All labels, in form order
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Default for $name {
            // First option of the selectbox
            fn default() -> Self {
                Self::ALL[0]
            }
        }
    };
}

categorical! {
    /// Customer gender
    Gender { Male => "Male", Female => "Female" }
}

categorical! {
    /// Marital status
    MaritalStatus { Single => "Single", Married => "Married", Divorced => "Divorced" }
}

categorical! {
    /// Highest completed education level
    EducationLevel {
        HighSchool => "High School",
        Bachelors => "Bachelor's",
        Masters => "Master's",
        Phd => "PhD",
    }
}

categorical! {
    /// Employment situation
    Occupation {
        Employed => "Employed",
        SelfEmployed => "Self-Employed",
        Unemployed => "Unemployed",
    }
}

categorical! {
    /// Residence area type
    Location { Urban => "Urban", Suburban => "Suburban", Rural => "Rural" }
}

categorical! {
    /// Insurance policy tier
    PolicyType { Basic => "Basic", Comprehensive => "Comprehensive", Premium => "Premium" }
}

categorical! {
    /// Whether the customer smokes
    SmokingStatus { Yes => "Yes", No => "No" }
}

categorical! {
    /// How often the customer exercises
    ExerciseFrequency {
        Daily => "Daily",
        Weekly => "Weekly",
        Monthly => "Monthly",
        Rarely => "Rarely",
    }
}

categorical! {
    /// Insured property type
    PropertyType { House => "House", Apartment => "Apartment", Condo => "Condo" }
}
