use std::fmt;

use async_trait::async_trait;
use log::{debug, error, info};

use crate::encoder::encode_line;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    First,
    Second,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "1"),
            Self::Second => write!(f, "2"),
        }
    }
}

/// Where each line starts in the holding register map and how many
/// characters it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub first_line: u16,
    pub second_line: u16,
    pub width: usize,
}

impl Layout {
    pub fn address(&self, line: Line) -> u16 {
        match line {
            Line::First => self.first_line,
            Line::Second => self.second_line,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            first_line: 1,
            second_line: 13,
            width: 12,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegisterWriter: Send {
    async fn write_registers(&mut self, address: u16, values: &[u16]) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}

pub struct Display<W> {
    writer: W,
    layout: Layout,
}

impl<W: RegisterWriter> Display<W> {
    pub fn new(writer: W, layout: Layout) -> Self {
        Self { writer, layout }
    }

    pub async fn try_write_line(&mut self, line: Line, text: &str) -> Result<()> {
        let registers = encode_line(text, self.layout.width);
        let address = self.layout.address(line);

        debug!(
            "line {line} at {address}: {text:?} ({} registers)",
            registers.len()
        );

        self.writer.write_registers(address, &registers).await
    }

    /// Same as [`Display::try_write_line`], but a failed write is only logged.
    pub async fn write_line(&mut self, line: Line, text: &str) {
        if let Err(err) = self.try_write_line(line, text).await {
            error!("unable to write line {line}: {err}");
        }
    }

    pub async fn close(&mut self) {
        match self.writer.close().await {
            Ok(()) => info!("display connection closed"),
            Err(err) => error!("unable to close display connection: {err}"),
        }
    }
}
