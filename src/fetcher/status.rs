/// Classification of a raw HTTP status code from the news API.
///
/// A pure function of the code, kept separate from the client so the whole
/// table can be tested without a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ServerError,
    Unauthorized,
    RateLimited(&'static str),
    Unknown,
}

impl StatusClass {
    pub fn of(code: u16) -> Self {
        match code {
            200 | 201 => StatusClass::Success,
            500 => StatusClass::ServerError,
            401 => StatusClass::Unauthorized,
            429 => StatusClass::RateLimited("request limit"),
            426 => StatusClass::RateLimited("page limit"),
            _ => StatusClass::Unknown,
        }
    }
}
