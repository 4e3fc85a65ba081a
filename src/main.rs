#[allow(non_snake_case)]
pub mod Balancer;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod LinAlg;
#[allow(non_snake_case)]
pub mod Utils;

use Examples::balancer_examples::balancer_examples;
use Utils::logger::init_logger;
use log::LevelFilter;

pub fn main() {
    //
    init_logger(LevelFilter::Info);
    let task: usize = 0;
    balancer_examples(task);
}
