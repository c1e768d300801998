#![cfg(test)]

mod scenarios;
mod utils;
