use std::process;

use retail_analyzer::application::the_app;

fn main() {
    match the_app() {
        Ok(()) => {}
        Err(err) => {
            println!("App failed during process: {err}");
            process::exit(1);
        }
    }
}
