use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// A transient message shown to the attendee after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn missing_information() -> Self {
        Self::destructive("Missing Information", "Please fill in all required fields.")
    }

    pub fn invalid_email() -> Self {
        Self::destructive("Invalid Email", "Please enter a valid email address.")
    }

    pub fn registration_failed() -> Self {
        Self::destructive(
            "Registration Failed",
            "There was an error generating your pass. Please try again.",
        )
    }

    pub fn registration_successful() -> Self {
        Self {
            title: "Registration Successful!".to_string(),
            description: "Your digital pass has been generated.".to_string(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn download_failed() -> Self {
        Self::destructive(
            "Download Failed",
            "Your pass could not be generated. Please try again.",
        )
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
