use toggle_derive::toggle_error;

#[toggle_error]
pub struct DemoError {
    message: String,
}

fn main() {}
