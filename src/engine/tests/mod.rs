mod common;

mod compute;
mod scorer;
