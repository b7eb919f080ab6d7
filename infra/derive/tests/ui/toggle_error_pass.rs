use std::borrow::Cow;

#[toggle_derive::toggle_error]
pub enum DemoError {
    #[error("Lookup failed{}: {key}", format_context(.context))]
    Missing { key: String, context: Option<Cow<'static, str>> },

    #[error("I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal failure{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    std::fs::read_to_string("/definitely/not/here").context("Reading demo file")
}

fn lookup(key: &str) -> Result<(), DemoError> {
    Err(DemoError::Missing { key: key.to_owned(), context: None }).context("Looking up key")
}

fn main() {
    let _ = read();
    let _ = lookup("a");
    let _: DemoError = "static message".into();
    let _: DemoError = String::from("owned message").into();
}
