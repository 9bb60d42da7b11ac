use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite identifier for a transfer rule. Exposed externally in the
/// colon-delimited form `source:destination:subject_area:group_number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub source_institution: String,
    pub destination_institution: String,
    pub subject_area: String,
    pub group_number: u32,
}

impl RuleKey {
    pub fn new(
        source_institution: impl Into<String>,
        destination_institution: impl Into<String>,
        subject_area: impl Into<String>,
        group_number: u32,
    ) -> Self {
        Self {
            source_institution: source_institution.into(),
            destination_institution: destination_institution.into(),
            subject_area: subject_area.into(),
            group_number,
        }
    }

    /// Parse the external colon-delimited form.
    pub fn parse(value: &str) -> Result<Self, RuleKeyError> {
        let segments: Vec<&str> = value.split(':').collect();
        let &[source, destination, subject_area, group] = segments.as_slice() else {
            return Err(RuleKeyError::Malformed(value.to_string()));
        };
        if source.is_empty() || destination.is_empty() || subject_area.is_empty() {
            return Err(RuleKeyError::Malformed(value.to_string()));
        }
        let group_number = group
            .parse::<u32>()
            .map_err(|_| RuleKeyError::GroupNumber(value.to_string()))?;
        Ok(Self::new(source, destination, subject_area, group_number))
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.source_institution,
            self.destination_institution,
            self.subject_area,
            self.group_number
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleKeyError {
    #[error("rule key '{0}' is not four colon-delimited segments")]
    Malformed(String),
    #[error("rule key '{0}' has a non-numeric group number")]
    GroupNumber(String),
}

/// Catalog status flags attached to a receiving course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFlags {
    pub is_undergraduate: bool,
    pub is_active: bool,
    pub is_message: bool,
    pub is_blanket: bool,
    pub is_unknown: bool,
}

impl CourseFlags {
    /// Flags for an ordinary active undergraduate course.
    pub fn regular() -> Self {
        Self {
            is_undergraduate: true,
            is_active: true,
            is_message: false,
            is_blanket: false,
            is_unknown: false,
        }
    }

    /// Flags for a course referenced by a rule but gone from the catalog.
    pub fn unknown() -> Self {
        Self {
            is_undergraduate: false,
            is_active: false,
            is_message: false,
            is_blanket: false,
            is_unknown: true,
        }
    }

    /// Message and blanket-credit courses are administrative placeholders
    /// rather than real course equivalencies.
    pub fn is_administrative(&self) -> bool {
        self.is_message || self.is_blanket
    }

    /// Compact marker string for the noteworthy flag settings: `G` not
    /// undergraduate, `I` inactive, `M` message, `B` blanket credit, `?`
    /// unknown. An active undergraduate course with real credit yields the
    /// empty string.
    pub fn markers(&self) -> String {
        let mut markers = String::new();
        if !self.is_undergraduate {
            markers.push('G');
        }
        if !self.is_active {
            markers.push('I');
        }
        if self.is_message {
            markers.push('M');
        }
        if self.is_blanket {
            markers.push('B');
        }
        if self.is_unknown {
            markers.push('?');
        }
        markers
    }
}

/// A course on the sending side of a rule: what the student took, with the
/// credit range earned and the grade range the rule requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendingCourse {
    pub course_id: u32,
    pub offer_nbr: u32,
    pub discipline: String,
    pub catalog_number: String,
    pub cuny_subject: String,
    /// Numeric form of the catalog number, used only for ordering.
    pub cat_num: f64,
    pub min_credits: f64,
    pub max_credits: f64,
    pub min_gpa: f64,
    pub max_gpa: f64,
}

impl SendingCourse {
    pub fn label(&self) -> String {
        format!("{} {}", self.discipline, self.catalog_number)
    }
}

/// A course on the receiving side of a rule: what credit is granted for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingCourse {
    pub course_id: u32,
    pub offer_nbr: u32,
    pub discipline: String,
    pub catalog_number: String,
    /// Numeric form of the catalog number, used only for ordering.
    pub cat_num: f64,
    pub transfer_credits: f64,
    pub flags: CourseFlags,
}

impl ReceivingCourse {
    pub fn label(&self) -> String {
        format!("{} {}", self.discipline, self.catalog_number)
    }
}

/// One transfer rule: a sending set and a receiving set under one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRule {
    pub key: RuleKey,
    pub sending: Vec<SendingCourse>,
    pub receiving: Vec<ReceivingCourse>,
}

/// Institution code to display-name lookup for report text.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionNames(std::collections::HashMap<String, String>);

impl InstitutionNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.0.insert(code.into(), name.into());
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for InstitutionNames {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
