use std::io::Write;

use mini_core::eval::{interpret, Evaluator};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	// Ctrl-C leaves the loop the same way `.exit` does
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}).expect("setting Ctrl-C handler");

	let stdin = std::io::stdin();

	// one evaluator for the whole session: variables and output
	// accumulate across lines
	let mut evaluator = Evaluator::new();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				// a single interactive line may omit its terminator
				let mut src = input.clone();
				if !src.trim_end().ends_with(';') {
					src.push(';');
				}

				match interpret(&src, &mut evaluator) {
					Ok(Some(value)) => println!("=> {value}"),
					Ok(None) => {},
					Err(err) => {
						let buf_writer = crate::cli::stderr_buffer_writer();
						let mut buf = buf_writer.buffer();

						err.pretty(&mut buf);
						buf_writer
							.print(&buf)
							.expect("Writing error to stderr");
					}
				}
			}
		}
	}
}
