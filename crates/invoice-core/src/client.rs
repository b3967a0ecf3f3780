//! # Client Rules
//!
//! Turns untrusted client request bodies into [`NewClient`] / [`ClientPatch`].
//!
//! | Field         | Create                         | Patch (when present)   |
//! |---------------|--------------------------------|------------------------|
//! | `name`        | required, 2-50, single-line    | same; empty rejected   |
//! | `companyName` | optional, ≤70, single-line     | same                   |
//! | `address`     | optional, ≤70, single-line     | same                   |
//! | `email`       | optional, ≤50, bare address    | same                   |
//!
//! All text is trimmed. Every field is checked; errors are collected, not
//! short-circuited.

use crate::error::{FieldError, ValidationErrors};
use crate::types::{ClientCreateInput, ClientPatchInput, ClientPatch, NewClient};
use crate::validation::{validate_email, validate_text, TextRules};

pub const NAME_MIN_RUNES: usize = 2;
pub const NAME_MAX_RUNES: usize = 50;
pub const COMPANY_NAME_MAX_RUNES: usize = 70;
pub const ADDRESS_MAX_RUNES: usize = 70;
pub const EMAIL_MAX_RUNES: usize = 50;

fn name_rules() -> TextRules {
    TextRules::new("name")
        .required()
        .runes(NAME_MIN_RUNES, NAME_MAX_RUNES)
        .single_line()
}

fn company_name_rules() -> TextRules {
    TextRules::new("companyName")
        .max_runes(COMPANY_NAME_MAX_RUNES)
        .single_line()
}

fn address_rules() -> TextRules {
    TextRules::new("address")
        .max_runes(ADDRESS_MAX_RUNES)
        .single_line()
}

/// Validates a create request.
///
/// ## Example
/// ```rust
/// use invoice_core::client::validate_client_create;
/// use invoice_core::types::ClientCreateInput;
///
/// let input = ClientCreateInput {
///     name: Some("  Ada Lovelace ".into()),
///     ..Default::default()
/// };
/// let client = validate_client_create(input).unwrap();
/// assert_eq!(client.name, "Ada Lovelace");
/// assert_eq!(client.email, "");
/// ```
pub fn validate_client_create(input: ClientCreateInput) -> Result<NewClient, ValidationErrors> {
    let mut errors = Vec::new();

    let name = validate_text(input.name.as_deref().unwrap_or_default(), &name_rules())
        .collect_into(&mut errors);
    let company_name = validate_text(
        input.company_name.as_deref().unwrap_or_default(),
        &company_name_rules(),
    )
    .collect_into(&mut errors);
    let address = validate_text(input.address.as_deref().unwrap_or_default(), &address_rules())
        .collect_into(&mut errors);
    let email = validate_email(
        "email",
        input.email.as_deref().unwrap_or_default(),
        EMAIL_MAX_RUNES,
    )
    .collect_into(&mut errors);

    if !errors.is_empty() {
        return Err(ValidationErrors::new(errors));
    }

    Ok(NewClient {
        name,
        company_name,
        address,
        email,
    })
}

/// Validates a patch request.
///
/// Only present fields are checked and written back sanitized. A patch with
/// no fields at all fails with a single `request` error.
pub fn validate_client_patch(input: ClientPatchInput) -> Result<ClientPatch, ValidationErrors> {
    let mut errors = Vec::new();

    let name = input
        .name
        .map(|v| validate_text(&v, &name_rules()).collect_into(&mut errors));
    let company_name = input
        .company_name
        .map(|v| validate_text(&v, &company_name_rules()).collect_into(&mut errors));
    let address = input
        .address
        .map(|v| validate_text(&v, &address_rules()).collect_into(&mut errors));
    let email = input
        .email
        .map(|v| validate_email("email", &v, EMAIL_MAX_RUNES).collect_into(&mut errors));

    let patch = ClientPatch {
        name,
        company_name,
        address,
        email,
    };

    if patch.is_empty() {
        errors.push(FieldError::invalid("request", "no fields to update"));
    }

    if !errors.is_empty() {
        return Err(ValidationErrors::new(errors));
    }

    Ok(patch)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldCode;

    fn create(name: &str) -> ClientCreateInput {
        ClientCreateInput {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sanitizes_all_fields() {
        let client = validate_client_create(ClientCreateInput {
            name: Some(" Ada ".into()),
            company_name: Some(" Analytical Ltd ".into()),
            address: Some(" 12 Engine Row ".into()),
            email: Some(" ada@example.com ".into()),
        })
        .unwrap();

        assert_eq!(
            client,
            NewClient {
                name: "Ada".into(),
                company_name: "Analytical Ltd".into(),
                address: "12 Engine Row".into(),
                email: "ada@example.com".into(),
            }
        );
    }

    #[test]
    fn test_create_requires_name() {
        let errs = validate_client_create(ClientCreateInput::default()).unwrap_err();
        assert_eq!(errs.errors().len(), 1);
        assert!(errs.has("name", FieldCode::Required));
    }

    #[test]
    fn test_create_collects_every_error() {
        let errs = validate_client_create(ClientCreateInput {
            name: Some("A".into()),
            company_name: Some("x".repeat(71)),
            address: Some("line one\nline two".into()),
            email: Some("Name <a@b.com>".into()),
        })
        .unwrap_err();

        assert!(errs.has("name", FieldCode::MinLength));
        assert!(errs.has("companyName", FieldCode::MaxLength));
        assert!(errs.has("address", FieldCode::Invalid));
        assert!(errs.has("email", FieldCode::Invalid));
    }

    #[test]
    fn test_create_name_boundaries() {
        assert!(validate_client_create(create("Al")).is_ok());
        assert!(validate_client_create(create(&"n".repeat(50))).is_ok());
        assert!(validate_client_create(create(&"n".repeat(51))).is_err());
    }

    #[test]
    fn test_patch_with_no_fields() {
        let errs = validate_client_patch(ClientPatchInput::default()).unwrap_err();
        assert_eq!(errs.errors().len(), 1);
        let err = &errs.errors()[0];
        assert_eq!(err.field, "request");
        assert_eq!(err.code, FieldCode::Invalid);
        assert_eq!(err.message, "no fields to update");
    }

    #[test]
    fn test_patch_empty_name_is_required() {
        let errs = validate_client_patch(ClientPatchInput {
            name: Some("   ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(errs.has("name", FieldCode::Required));
        // Present-but-empty still counts as a field to update
        assert!(!errs.has_field("request"));
    }

    #[test]
    fn test_patch_allows_clearing_optional_fields() {
        let patch = validate_client_patch(ClientPatchInput {
            company_name: Some("".into()),
            email: Some("  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.company_name.as_deref(), Some(""));
        assert_eq!(patch.email.as_deref(), Some(""));
        assert_eq!(patch.address, None);
    }

    #[test]
    fn test_patch_writes_back_sanitized_values() {
        let patch = validate_client_patch(ClientPatchInput {
            name: Some("  Grace Hopper  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn test_patch_validates_email() {
        let errs = validate_client_patch(ClientPatchInput {
            email: Some("not-an-email".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(errs.has("email", FieldCode::Invalid));
    }
}
