use super::{Column, LineNumber};

pub struct Error {
    code: u16,
    line_number: LineNumber,
    column: Column,
    message: &'static str,
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
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            column: 0..0,
            message: "",
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            column: self.column.clone(),
            message: self.message,
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: column.clone(),
            message: self.message,
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: self.column.clone(),
            message,
        }
    }
}

/// Diagnostic codes. The numbering follows the classic PL/0 compiler
/// this language descends from: 1xx for program and declaration
/// structure, 14x/15x/16x/17x for statements, 18x/19x/20x/21x for
/// calls and I/O and assignment, 22x/23x for factors, 241 for
/// conditions, 25x for resource limits and runtime faults.
pub enum ErrorCode {
    ExpectedMain = 101,
    ExpectedProgramBrace = 102,
    ExpectedProgramEnd = 103,
    ExpectedConstIdent = 105,
    ExpectedConstEqual = 106,
    ExpectedConstNumber = 107,
    NestingTooDeep = 111,
    ExpectedDeclSemicolon = 112,
    ExpectedStringSemicolon = 113,
    ExpectedProcedureIdent = 114,
    ExpectedProcedureBrace = 115,
    ExpectedStatementAfterProcedure = 116,
    ExpectedProcedureSemicolon = 117,
    UnexpectedDeclaration = 118,
    DuplicateIdent = 119,
    ExpectedVarIdent = 121,
    UnexpectedBlockEnd = 129,
    ExpectedStringIdent = 131,
    ExpectedStatement = 141,
    ExpectedWhileParen = 151,
    ExpectedWhileEndParen = 152,
    ExpectedSemicolon = 161,
    ExpectedBraceEnd = 162,
    ExpectedIfParen = 171,
    ExpectedIfEndParen = 172,
    ExpectedThen = 173,
    UndeclaredProcedure = 181,
    CallOfNonProcedure = 182,
    ExpectedCallIdent = 183,
    ExpectedPrintParen = 191,
    ExpectedPrintEndParen = 192,
    UnknownScanTarget = 201,
    ScanTargetNotAssignable = 202,
    ExpectedScanParen = 203,
    ExpectedScanEndParen = 204,
    ExpectedBecomes = 211,
    ExpectedStringBecomes = 212,
    AssignToNonVariable = 213,
    UndeclaredAssignTarget = 214,
    ExpectedFactor = 221,
    ProcedureAsValue = 222,
    UndeclaredIdent = 223,
    NumberTooLarge = 224,
    ExpectedFactorEndParen = 225,
    UnexpectedFactor = 226,
    StringOperandInExpression = 228,
    ExpectedStringFactor = 231,
    ProcedureInStringExpression = 232,
    NotAStringOperand = 233,
    UndeclaredStringIdent = 234,
    StringNumberTooLarge = 235,
    ExpectedStringEndParen = 236,
    UnexpectedStringFactor = 237,
    ExpectedRelop = 241,
    ProgramTooLong = 250,
    StackOverflow = 251,
    DivisionByZero = 252,
    TypeMismatch = 253,
    InternalError = 254,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            101 => "EXPECTED 'main'",
            102 => "EXPECTED '{' AFTER 'main'",
            103 => "EXPECTED '}' AT END OF PROGRAM",
            105 => "EXPECTED IDENTIFIER AFTER 'const'",
            106 => "EXPECTED '=' IN CONSTANT DECLARATION",
            107 => "EXPECTED NUMBER IN CONSTANT DECLARATION",
            111 => "NESTING TOO DEEP",
            112 => "EXPECTED ';' AFTER DECLARATION",
            113 => "EXPECTED ';' AFTER STRING DECLARATION",
            114 => "EXPECTED IDENTIFIER AFTER 'procedure'",
            115 => "EXPECTED '{' AFTER PROCEDURE NAME",
            116 => "EXPECTED STATEMENT AFTER PROCEDURE",
            117 => "EXPECTED ';' AFTER PROCEDURE BODY",
            118 => "UNEXPECTED SYMBOL IN DECLARATIONS",
            119 => "IDENTIFIER ALREADY DECLARED",
            121 => "EXPECTED IDENTIFIER AFTER 'var'",
            129 => "UNEXPECTED SYMBOL AFTER BLOCK",
            131 => "EXPECTED IDENTIFIER AFTER 'string'",
            141 => "EXPECTED STATEMENT",
            151 => "EXPECTED '(' AFTER 'while'",
            152 => "EXPECTED ')' AFTER CONDITION",
            161 => "EXPECTED ';' BETWEEN STATEMENTS",
            162 => "EXPECTED '}'",
            171 => "EXPECTED '(' AFTER 'if'",
            172 => "EXPECTED ')' AFTER CONDITION",
            173 => "EXPECTED 'then'",
            181 => "UNDECLARED PROCEDURE",
            182 => "'call' MUST NAME A PROCEDURE",
            183 => "EXPECTED IDENTIFIER AFTER 'call'",
            191 => "EXPECTED '(' AFTER 'print'",
            192 => "EXPECTED ')' AFTER PRINT ARGUMENTS",
            201 => "'scan' TARGET MUST BE A DECLARED NAME",
            202 => "'scan' TARGET IS NOT A VARIABLE",
            203 => "EXPECTED '(' AFTER 'scan'",
            204 => "EXPECTED ')' AFTER SCAN TARGETS",
            211 => "EXPECTED ':='",
            212 => "EXPECTED ':=' IN STRING ASSIGNMENT",
            213 => "ASSIGNMENT TARGET IS NOT A VARIABLE",
            214 => "UNDECLARED IDENTIFIER IN ASSIGNMENT",
            221 => "EXPECTED FACTOR",
            222 => "PROCEDURE USED AS A VALUE",
            223 => "UNDECLARED IDENTIFIER",
            224 => "NUMBER TOO LARGE",
            225 => "EXPECTED ')' IN EXPRESSION",
            226 => "UNEXPECTED SYMBOL IN EXPRESSION",
            228 => "STRING NOT ALLOWED IN NUMERIC EXPRESSION",
            231 => "EXPECTED STRING FACTOR",
            232 => "PROCEDURE USED IN STRING EXPRESSION",
            233 => "IDENTIFIER NOT USABLE IN STRING EXPRESSION",
            234 => "UNDECLARED IDENTIFIER IN STRING EXPRESSION",
            235 => "NUMBER TOO LARGE IN STRING EXPRESSION",
            236 => "EXPECTED ')' IN STRING EXPRESSION",
            237 => "UNEXPECTED SYMBOL IN STRING EXPRESSION",
            241 => "EXPECTED RELATIONAL OPERATOR",
            250 => "PROGRAM TOO LONG",
            251 => "STACK OVERFLOW",
            252 => "DIVISION BY ZERO",
            253 => "TYPE MISMATCH",
            254 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            if suffix.is_empty() {
                write!(f, "PROGRAM ERROR {}", self.code)
            } else {
                write!(f, "PROGRAM ERROR {} IN{}", self.code, suffix)
            }
        } else if suffix.is_empty() {
            write!(f, "E{} {}", self.code, code_str)
        } else {
            write!(f, "E{} {} IN{}", self.code, code_str, suffix)
        }
    }
}
