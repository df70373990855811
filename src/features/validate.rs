use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },

    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),

    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    #[error("balance must be a non-negative finite number, got {0}")]
    NegativeBalance(f64),

    #[error("origin and destination accounts must differ")]
    SelfTransfer,
}

pub(crate) type ValidationResult = Result<(), ValidationError>;

/// A required string field must contain at least one character.
pub(crate) fn non_empty(field: &'static str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// A transactable amount must be finite and strictly positive.
/// NaN is caught by the finiteness check.
pub(crate) fn positive_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() {
        return Err(ValidationError::NonFiniteAmount(amount));
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// A balance may be zero, but never negative, NaN or infinite.
pub(crate) fn non_negative_balance(balance: f64) -> ValidationResult {
    if !balance.is_finite() || balance < 0.0 {
        return Err(ValidationError::NegativeBalance(balance));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn non_empty_accepts_any_character() {
        assert!(non_empty("name", "a").is_ok());
        assert!(non_empty("name", " ").is_ok());
        assert_eq!(
            non_empty("name", ""),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test_case(1.0 => true; "one")]
    #[test_case(0.0001 => true; "small fraction")]
    #[test_case(0.0 => false; "zero")]
    #[test_case(-1.0 => false; "negative")]
    #[test_case(f64::NAN => false; "nan")]
    #[test_case(f64::INFINITY => false; "positive infinity")]
    #[test_case(f64::NEG_INFINITY => false; "negative infinity")]
    fn positive_amount_cases(amount: f64) -> bool {
        positive_amount(amount).is_ok()
    }

    #[test_case(0.0 => true; "zero")]
    #[test_case(100.5 => true; "positive")]
    #[test_case(-0.01 => false; "negative")]
    #[test_case(f64::NAN => false; "nan")]
    #[test_case(f64::INFINITY => false; "infinity")]
    fn non_negative_balance_cases(balance: f64) -> bool {
        non_negative_balance(balance).is_ok()
    }
}
