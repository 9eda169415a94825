use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use reflect_core::{HumanInput, ReflectError};

/// Line-at-a-time reads from stdin, used for maintainer interventions.
pub struct StdinHumanInput {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinHumanInput {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinHumanInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HumanInput for StdinHumanInput {
    async fn read_line(&mut self, prompt: &str) -> Result<String, ReflectError> {
        print!("{}", prompt.green());
        let _ = std::io::stdout().flush();

        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(ReflectError::InputClosed),
            Err(err) => {
                log::warn!("stdin read failed: {}", err);
                Err(ReflectError::InputClosed)
            }
        }
    }
}
