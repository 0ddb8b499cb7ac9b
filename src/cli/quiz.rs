//! Quiz command: run the roast quiz interactively in the terminal.

use std::io::{BufRead, Write, stdin, stdout};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::quiz::Quiz;

/// Run the quiz loop on stdin/stdout.
pub fn run_quiz() -> Result<()> {
    let stdin = stdin();
    let mut quiz = Quiz::new();

    println!("{}", "Find your roast".bold());
    println!("Answer with an option number, `b` to go back, `q` to quit.\n");

    while let Some(question) = quiz.current() {
        let (position, total) = quiz.progress();
        println!(
            "{} {}",
            format!("[{position}/{total}]").bright_yellow().bold(),
            question.prompt.bold()
        );
        for (index, option) in question.options.iter().enumerate() {
            println!("  {}. {}", index + 1, option.text);
        }

        print!("> ");
        stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read answer")?
            == 0
        {
            // stdin closed mid-quiz
            return Ok(());
        }

        match line.trim() {
            "q" | "quit" => return Ok(()),
            "b" | "back" => {
                if !quiz.back() {
                    println!("{}", "already at the first question".dimmed());
                }
            }
            input => {
                let answered = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .is_some_and(|index| quiz.choose(index));
                if !answered {
                    println!("{}", "pick one of the listed options".dimmed());
                }
            }
        }
        println!();
    }

    let profile = quiz
        .result()
        .context("quiz completed without a result")?;

    println!("{}", profile.name.bright_green().bold());
    println!("{}\n", profile.description);
    for characteristic in &profile.characteristics {
        println!("  - {characteristic}");
    }
    println!(
        "\nBrew it with: {}",
        profile.brew_methods.join(", ").bright_yellow()
    );
    Ok(())
}
