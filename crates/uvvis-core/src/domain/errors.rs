use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SpectrumResult<T> = Result<T, SpectrumError>;
pub type ComputeResult<T> = SpectrumResult<T>;
pub type ParserResult<T> = SpectrumResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectrumErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl SpectrumErrorCategory {
    pub const fn exit_class(self) -> ExitClass {
        match self {
            Self::InputValidationError => ExitClass {
                exit_code: 2,
                category_name: "InputValidationError",
            },
            Self::IoSystemError => ExitClass {
                exit_code: 3,
                category_name: "IoSystemError",
            },
            Self::ComputationError => ExitClass {
                exit_code: 4,
                category_name: "ComputationError",
            },
            Self::InternalError => ExitClass {
                exit_code: 5,
                category_name: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_class().exit_code
    }

    pub const fn category_name(self) -> &'static str {
        self.exit_class().category_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitClass {
    pub exit_code: i32,
    pub category_name: &'static str,
}

/// Categorized failure carrying a stable placeholder code such as
/// `IO.EXTRACT_DIRECTORY`, used for diagnostics and process exit codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumError {
    category: SpectrumErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SpectrumError {
    pub fn new(
        category: SpectrumErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            SpectrumErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectrumErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectrumErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectrumErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> SpectrumErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for SpectrumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.category_name(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for SpectrumError {}

#[cfg(test)]
mod tests {
    use super::{SpectrumError, SpectrumErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (
                SpectrumErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (SpectrumErrorCategory::IoSystemError, 3, "IoSystemError"),
            (SpectrumErrorCategory::ComputationError, 4, "ComputationError"),
            (SpectrumErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            let class = category.exit_class();
            assert_eq!(class.exit_code, exit_code);
            assert_eq!(class.category_name, name);
            assert_ne!(category.exit_code(), 0);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = SpectrumError::input_validation(
            "INPUT.AVERAGE_MODE",
            "unsupported averaging mode 'geometric'",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.AVERAGE_MODE] unsupported averaging mode 'geometric'"
        );
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.AVERAGE_MODE] unsupported averaging mode 'geometric'"
        );
    }
}
