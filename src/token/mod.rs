mod parser;
mod profile;

pub use parser::parse;
pub use profile::Profile;
