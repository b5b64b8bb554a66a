//! Request validation for the customer operations.
//!
//! Rules run in a fixed order and the first failure wins. The id rule only
//! applies to updates; creates never carry an id (the store generates one).

use crate::{
    constants,
    error::{ServiceError, ServiceResult},
    models::customer::CustomerDTO,
    services::functional_patterns::{validation_rules, Validator},
};

fn has_digits(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn name_rule(message: &'static str) -> impl Fn(&String) -> ServiceResult<()> {
    move |value: &String| {
        if value.is_empty() || has_digits(value) {
            Err(ServiceError::bad_request(message))
        } else {
            Ok(())
        }
    }
}

fn email_rule() -> impl Fn(&String) -> ServiceResult<()> {
    |value: &String| {
        if validation_rules::matches(validation_rules::EMAIL_PATTERN, value) {
            Ok(())
        } else {
            Err(ServiceError::bad_request(constants::MESSAGE_INVALID_EMAIL))
        }
    }
}

fn phone_rule() -> impl Fn(&String) -> ServiceResult<()> {
    |value: &String| {
        if value.is_empty() {
            // TODO: add better validation for phone number
            Err(ServiceError::bad_request(constants::MESSAGE_INVALID_PHONE))
        } else {
            Ok(())
        }
    }
}

/// Build a validator for `CustomerDTO`. `is_create` drops the id rule, since
/// a create request never references an existing row.
pub fn customer_validator(is_create: bool) -> Validator<CustomerDTO> {
    let validator = Validator::new();
    let validator = if is_create {
        validator
    } else {
        validator.rule(|dto: &CustomerDTO| {
            if dto.id.is_none() {
                Err(ServiceError::bad_request(
                    constants::MESSAGE_INVALID_CUSTOMER_ID,
                ))
            } else {
                Ok(())
            }
        })
    };

    validator
        .rule(|dto: &CustomerDTO| name_rule(constants::MESSAGE_INVALID_FIRST_NAME)(&dto.first_name))
        .rule(|dto: &CustomerDTO| name_rule(constants::MESSAGE_INVALID_LAST_NAME)(&dto.last_name))
        .rule(|dto: &CustomerDTO| email_rule()(&dto.email_address))
        .rule(|dto: &CustomerDTO| phone_rule()(&dto.phone_number))
}

/// Validate a customer payload for the create or update path.
pub fn validate_customer(dto: &CustomerDTO, is_create: bool) -> ServiceResult<()> {
    customer_validator(is_create).validate(dto)
}

/// Validate an email address on its own, for the email lookup path.
pub fn validate_customer_email(email: &str) -> ServiceResult<()> {
    if validation_rules::matches(validation_rules::EMAIL_PATTERN, email) {
        Ok(())
    } else {
        Err(ServiceError::bad_request(constants::MESSAGE_INVALID_EMAIL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn valid_customer() -> CustomerDTO {
        CustomerDTO {
            id: None,
            first_name: "Jane".to_string(),
            middle_name: None,
            last_name: "Doe".to_string(),
            email_address: "jane@x.com".to_string(),
            phone_number: "4255550000".to_string(),
        }
    }

    fn valid_customer_with_id() -> CustomerDTO {
        CustomerDTO {
            id: Some(Uuid::new_v4()),
            ..valid_customer()
        }
    }

    #[test]
    fn valid_create_payload_passes() {
        assert!(validate_customer(&valid_customer(), true).is_ok());
    }

    #[test]
    fn valid_update_payload_passes() {
        assert!(validate_customer(&valid_customer_with_id(), false).is_ok());
    }

    #[test]
    fn update_without_id_is_rejected() {
        let err = validate_customer(&valid_customer(), false).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_CUSTOMER_ID);
    }

    #[test]
    fn create_without_id_is_fine() {
        assert!(validate_customer(&valid_customer(), true).is_ok());
    }

    #[test]
    fn digits_in_names_are_rejected_regardless_of_other_fields() {
        let mut dto = valid_customer();
        dto.first_name = "Jane2".to_string();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_FIRST_NAME);

        let mut dto = valid_customer();
        dto.last_name = "D0e".to_string();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_LAST_NAME);
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut dto = valid_customer();
        dto.first_name = String::new();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_FIRST_NAME);

        let mut dto = valid_customer();
        dto.last_name = String::new();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_LAST_NAME);
    }

    #[test]
    fn rules_apply_in_order() {
        // Both the first name and the email are invalid; the name rule runs
        // first and its message wins.
        let mut dto = valid_customer();
        dto.first_name = "Jane2".to_string();
        dto.email_address = "not-an-email".to_string();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_FIRST_NAME);
    }

    #[test]
    fn email_grammar_is_enforced() {
        for bad in ["not-an-email", "missing-domain@", "no-dot@domain", "@x.com", ""] {
            let mut dto = valid_customer();
            dto.email_address = bad.to_string();
            let err = validate_customer(&dto, true).unwrap_err();
            assert_eq!(err.message(), constants::MESSAGE_INVALID_EMAIL, "{}", bad);
        }

        for good in ["jane@x.com", "a.b@sub.domain.org", "x+tag@y.co"] {
            let mut dto = valid_customer();
            dto.email_address = good.to_string();
            assert!(validate_customer(&dto, true).is_ok(), "{}", good);
        }
    }

    #[test]
    fn empty_phone_is_rejected() {
        let mut dto = valid_customer();
        dto.phone_number = String::new();
        let err = validate_customer(&dto, true).unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_PHONE);
    }

    #[test]
    fn middle_name_is_unconstrained() {
        let mut dto = valid_customer();
        dto.middle_name = Some("X123".to_string());
        assert!(validate_customer(&dto, true).is_ok());
    }

    #[test]
    fn standalone_email_validation_matches_the_full_rule() {
        assert!(validate_customer_email("jane@x.com").is_ok());
        let err = validate_customer_email("jane@nodot").unwrap_err();
        assert_eq!(err.message(), constants::MESSAGE_INVALID_EMAIL);
    }
}
