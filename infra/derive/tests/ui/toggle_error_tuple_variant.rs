use toggle_derive::toggle_error;

#[toggle_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
