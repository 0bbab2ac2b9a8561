//! Report-creation form and its synchronous validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::api::{IssueType, Location, NewIssue};

pub const MAX_OTHER_TYPE_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a title")]
    MissingTitle,
    #[error("please describe the issue")]
    MissingDescription,
    #[error("please select a location on the map")]
    MissingLocation,
    #[error("please describe the issue type")]
    MissingOtherType,
    #[error("issue type description is limited to 120 characters")]
    OtherTypeTooLong,
}

/// Form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Type,
    OtherType,
    Address,
    Attachment,
    Map,
}

impl Field {
    pub fn is_text(self) -> bool {
        !matches!(self, Field::Type | Field::Map)
    }
}

#[derive(Debug, Clone)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub issue_type: IssueType,
    /// Free-text type, only used with `IssueType::Other`
    pub other_type: String,
    /// Editable address; overwritten whenever the map resolves a new location
    pub address: String,
    pub attachment: String,
    pub location: Option<Location>,
    pub focus: Field,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            issue_type: IssueType::RoadInfrastructure,
            other_type: String::new(),
            address: String::new(),
            attachment: String::new(),
            location: None,
            focus: Field::Title,
        }
    }
}

impl ReportForm {
    /// Fields that currently accept focus.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Title, Field::Description, Field::Type];
        if self.issue_type == IssueType::Other {
            fields.push(Field::OtherType);
        }
        fields.extend([Field::Address, Field::Attachment, Field::Map]);
        fields
    }

    pub fn focus_next(&mut self, delta: isize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    /// Cycle the issue type; leaving `Other` clears its description.
    pub fn cycle_type(&mut self, delta: isize) {
        let all = IssueType::ALL;
        let current = all.iter().position(|t| *t == self.issue_type).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(all.len() as isize) as usize;
        self.issue_type = all[next];
        if self.issue_type != IssueType::Other {
            self.other_type.clear();
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::OtherType => Some(&mut self.other_type),
            Field::Address => Some(&mut self.address),
            Field::Attachment => Some(&mut self.attachment),
            Field::Type | Field::Map => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let at_limit = self.focus == Field::OtherType
            && self.other_type.chars().count() >= MAX_OTHER_TYPE_LEN;
        if at_limit {
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Take a location resolved on the map.
    pub fn set_location(&mut self, location: Location) {
        self.address = location.address.clone();
        self.location = Some(location);
    }

    /// Type label sent to the backend.
    pub fn type_label(&self) -> String {
        let other = self.other_type.trim();
        if self.issue_type == IssueType::Other && !other.is_empty() {
            format!("Other – {other}")
        } else {
            self.issue_type.label().to_string()
        }
    }

    /// Check required fields and build the submission.
    pub fn validate(&self) -> Result<NewIssue, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.issue_type == IssueType::Other {
            let other = self.other_type.trim();
            if other.is_empty() {
                return Err(ValidationError::MissingOtherType);
            }
            if other.chars().count() > MAX_OTHER_TYPE_LEN {
                return Err(ValidationError::OtherTypeTooLong);
            }
        }

        let address = self.address.trim();
        let location = match &self.location {
            Some(location) if !address.is_empty() => Location {
                address: address.to_string(),
                ..location.clone()
            },
            _ => return Err(ValidationError::MissingLocation),
        };

        let attachment = self.attachment.trim();
        Ok(NewIssue {
            title: title.to_string(),
            description: description.to_string(),
            issue_type: self.type_label(),
            location,
            attachment: (!attachment.is_empty()).then(|| PathBuf::from(attachment)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReportForm {
        let mut form = ReportForm {
            title: "Broken streetlight".to_string(),
            description: "Dark since Monday".to_string(),
            ..ReportForm::default()
        };
        form.set_location(Location {
            latitude: 20.9,
            longitude: 77.7,
            address: "Amravati, Maharashtra".to_string(),
        });
        form
    }

    #[test]
    fn test_valid_form() {
        let issue = filled().validate().unwrap();
        assert_eq!(issue.title, "Broken streetlight");
        assert_eq!(issue.issue_type, "Road Infrastructure");
        assert_eq!(issue.location.address, "Amravati, Maharashtra");
        assert_eq!(issue.attachment, None);
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled();
        form.title = "  ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingTitle));

        let mut form = filled();
        form.description.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingDescription));

        let mut form = filled();
        form.location = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingLocation));

        let mut form = filled();
        form.address.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingLocation));
    }

    #[test]
    fn test_edited_address_is_submitted() {
        let mut form = filled();
        form.address = "Near the bus stand".to_string();
        let issue = form.validate().unwrap();
        assert_eq!(issue.location.address, "Near the bus stand");
        assert_eq!(issue.location.latitude, 20.9);
    }

    #[test]
    fn test_other_type_requires_description() {
        let mut form = filled();
        form.issue_type = IssueType::Other;
        assert_eq!(form.validate(), Err(ValidationError::MissingOtherType));

        form.other_type = " Graffiti ".to_string();
        assert_eq!(form.validate().unwrap().issue_type, "Other – Graffiti");
    }

    #[test]
    fn test_other_type_length_is_capped_on_input() {
        let mut form = filled();
        form.issue_type = IssueType::Other;
        form.focus = Field::OtherType;
        for _ in 0..MAX_OTHER_TYPE_LEN + 10 {
            form.insert_char('x');
        }
        assert_eq!(form.other_type.len(), MAX_OTHER_TYPE_LEN);
    }

    #[test]
    fn test_leaving_other_clears_description() {
        let mut form = filled();
        form.issue_type = IssueType::PublicSafety;
        form.cycle_type(1);
        assert_eq!(form.issue_type, IssueType::Other);
        form.other_type = "Noise".to_string();
        form.cycle_type(1);
        assert_eq!(form.issue_type, IssueType::RoadInfrastructure);
        assert!(form.other_type.is_empty());
    }

    #[test]
    fn test_focus_skips_hidden_other_field() {
        let mut form = ReportForm {
            focus: Field::Type,
            ..ReportForm::default()
        };
        form.focus_next(1);
        assert_eq!(form.focus, Field::Address);

        form.issue_type = IssueType::Other;
        form.focus = Field::Type;
        form.focus_next(1);
        assert_eq!(form.focus, Field::OtherType);

        form.focus = Field::Title;
        form.focus_next(-1);
        assert_eq!(form.focus, Field::Map);
    }
}
