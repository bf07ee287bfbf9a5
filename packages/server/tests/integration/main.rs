mod common;
mod encryption;
mod judging;
