mod common;

mod engine;
mod routing;
mod smc;
mod tdiu;
