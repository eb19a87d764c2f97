use std::process::ExitCode;

use bitmix_sdk::{Currency, Order, Payload};
use serde_json::Value;

/// What to print for a result, and the exit status to leave with.
#[derive(Debug, PartialEq)]
pub struct Rendered {
    pub text: Option<String>,
    pub success: bool,
}

impl Rendered {
    fn print(text: String) -> Self {
        Self {
            text: Some(text),
            success: true,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// JSON booleans become the exit status, everything else is printed.
pub fn render_payload(payload: &Payload) -> Rendered {
    match payload {
        Payload::Json(Value::Bool(success)) => Rendered {
            text: None,
            success: *success,
        },
        Payload::Json(value) => Rendered::print(
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        ),
        Payload::Raw(bytes) => Rendered::print(String::from_utf8_lossy(bytes).into_owned()),
    }
}

pub fn render_text(text: String) -> Rendered {
    Rendered::print(text)
}

pub fn render_order(currency: Currency, order: &Order, letter: &str) -> Rendered {
    Rendered::print(format!(
        "{}\nID: {}\n{}",
        currency.payment_uri(&order.address),
        order.id,
        letter
    ))
}
