//! `h5fetch list` – show built-in datasets.

use h5fetch_core::Dataset;

pub fn run_list() {
    println!("{:<18} URL", "NAME");
    for d in Dataset::ALL {
        println!("{:<18} {}", d.name(), d.url());
    }
}
