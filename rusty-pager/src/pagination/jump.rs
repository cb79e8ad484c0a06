//! Jump-to-page prompt: modal description and target validation.

use super::error::InputValidationError;
use super::token::{PAGE_INPUT_ID, build_modal_custom_id};

const UNKNOWN_TOTAL_MAX_LENGTH: u16 = 7;

/// Transport-neutral description of the jump modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpModal {
    pub custom_id: String,
    pub title: String,
    pub input_id: String,
    pub input_label: String,
    pub placeholder: String,
    pub max_length: u16,
}

/// What the prompt knows about the session's extent when a page number is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpBounds {
    pub total_pages: Option<usize>,
    pub exhausted: bool,
    pub buffered_pages: usize,
}

/// Single-field modal collecting a 1-based target page.
pub struct PageJumpPrompt;

impl PageJumpPrompt {
    /// Describe the modal for a session.
    pub fn modal(session_id: u64, total_pages: Option<usize>) -> JumpModal {
        let (range, max_length) = match total_pages {
            Some(total) => {
                let digits = total.to_string().len() as u16;
                (total.to_string(), digits + 2)
            }
            None => ("?".to_owned(), UNKNOWN_TOTAL_MAX_LENGTH),
        };

        JumpModal {
            custom_id: build_modal_custom_id(session_id),
            title: "Jump to Page".to_owned(),
            input_id: PAGE_INPUT_ID.to_owned(),
            input_label: "Page Number".to_owned(),
            placeholder: format!("Enter page (1-{range})"),
            max_length,
        }
    }

    /// Validate a submitted page number, returning the 0-based target.
    ///
    /// Checks run in order: numeric input, range against a known total, then
    /// whether a total can be established at all.
    pub fn validate(raw: &str, bounds: JumpBounds) -> Result<usize, InputValidationError> {
        let entered = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InputValidationError::NotANumber)?;

        let total_pages = match bounds.total_pages {
            Some(total) => total,
            None if !bounds.exhausted => return Err(InputValidationError::TotalUnknown),
            None => bounds.buffered_pages.max(1),
        };

        match usize::try_from(entered) {
            Ok(page) if (1..=total_pages).contains(&page) => Ok(page - 1),
            _ => Err(InputValidationError::OutOfRange { total_pages }),
        }
    }
}
