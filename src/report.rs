//! Report

use std::{fmt::Write, io};

use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{curation::Curation, format::format_eth, tiers::CuratedCover};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CuratedCover<'_> {
    /// Prints the cover as a table, one block per tier, followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Tier", "Token", "Source", "Price"]);

        let mut tier_boundary_rows: SmallVec<[usize; 8]> = smallvec![];
        let mut current_row = 1; // header is row 0

        for tier in self.tiers() {
            tier_boundary_rows.push(current_row);

            for (idx, listing) in tier.listings().iter().enumerate() {
                let label = if idx == 0 {
                    format!("{} ({})", tier.label(), tier.count())
                } else {
                    String::new()
                };

                builder.push_record([
                    label,
                    listing.id().to_string(),
                    listing.source().to_string(),
                    format_eth(*listing.price().amount()),
                ]);

                current_row += 1;
            }
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        for &row in &tier_boundary_rows {
            if row > 1 {
                theme.insert_horizontal_line(row, separator);
            }
        }

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..4), Alignment::right());

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "\n{table_str}")?;
        writeln!(
            out,
            " \x1b[1mTotal:\x1b[0m {} for {} listings\n",
            format_eth(*self.total().amount()),
            self.len()
        )?;

        Ok(())
    }
}

impl Curation<'_> {
    /// Prints the curated cover, or a note that none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        match self {
            Curation::Covered(cover) => cover.write_to(out),
            Curation::Unreachable => {
                writeln!(out, "\nNo exact cover: listed tokens cannot add up to the target\n")?;

                Ok(())
            }
        }
    }
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
