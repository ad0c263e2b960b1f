use std::io::{self, BufReader};

use kestrel::book::Book;
use kestrel::config::EngineConfig;
use kestrel::protocol::Engine;

fn main() {
    let config = EngineConfig::from_env();

    #[cfg(feature = "cli")]
    kestrel::logger::init(&config.log_path, &config.log_filter);

    let book = Book::load("book.txt");
    if book.is_empty() {
        println!("info string no opening book loaded");
    } else {
        println!("info string opening book loaded, {} entries", book.len());
    }

    let mut engine = Engine::new(config, book);
    engine.run(BufReader::new(io::stdin()));
}
