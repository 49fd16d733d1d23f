use super::Column;

pub struct Error {
    code: ErrorCode,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            column: column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            code: self.code,
            column: self.column.clone(),
            message: message.to_string(),
        }
    }
}

/// Every way a compile unit can fail. Runtime instructions cannot fail;
/// anything that would go wrong at run time is rejected here first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    LexError = 1,
    SyntaxError = 2,
    CapacityExceeded = 3,
    RegisterExhausted = 4,
    BlockImbalance = 5,
    LoadError = 6,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::LexError => "LEX ERROR",
            ErrorCode::SyntaxError => "SYNTAX ERROR",
            ErrorCode::CapacityExceeded => "CAPACITY EXCEEDED",
            ErrorCode::RegisterExhausted => "REGISTER EXHAUSTED",
            ErrorCode::BlockImbalance => "BLOCK IMBALANCE",
            ErrorCode::LoadError => "LOAD ERROR",
            ErrorCode::InternalError => "INTERNAL ERROR",
        };
        let mut suffix = String::new();
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if suffix.is_empty() {
            write!(f, "{}", code_str)
        } else {
            write!(f, "{} IN{}", code_str, suffix)
        }
    }
}
