//! Human-readable dumps of tables, entries and chains.
//!
//! The `*Dump` wrappers implement [`fmt::Display`] over optional references,
//! so an absent table or entry prints as `NULL` instead of failing. The
//! `write_*` helpers send the same text to any [`io::Write`].

use std::fmt;
use std::io;

use crate::entry::{Entry, EntryIndex};
use crate::table::Table;

/// Displays a table's schema, size and storage address.
#[derive(Copy, Clone)]
pub struct TableDump<'a>(pub Option<&'a Table>);

impl fmt::Display for TableDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = match self.0 {
            Some(table) => table,
            None => return writeln!(f, "HT NULL"),
        };
        writeln!(f, "HT [")?;
        writeln!(
            f,
            "  key, val : <{}, {}>",
            table.key_kind(),
            table.value_kind()
        )?;
        writeln!(f, "  capacity : {}", table.capacity())?;
        writeln!(f, "  len : {}", table.len())?;
        match table.storage_ptr() {
            Some(ptr) => writeln!(f, "  ptr : {:p}", ptr)?,
            None => writeln!(f, "  ptr : NULL")?,
        }
        writeln!(f, "]")
    }
}

/// Displays one entry's key, value and chain link.
#[derive(Copy, Clone)]
pub struct EntryDump<'a>(pub Option<&'a Entry>);

impl fmt::Display for EntryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = match self.0 {
            Some(entry) => entry,
            None => return writeln!(f, "HTE NULL"),
        };
        writeln!(f, "HTE [")?;
        writeln!(
            f,
            "  key, val : <{}:{}, {}:{}>",
            entry.key(),
            entry.key_kind(),
            entry.value(),
            entry.value_kind()
        )?;
        match entry.next() {
            Some(next) => writeln!(f, "  next : {}", next)?,
            None => writeln!(f, "  next : NULL")?,
        }
        writeln!(f, "]")
    }
}

/// Displays an entry followed by everything reachable through its chain.
#[derive(Copy, Clone)]
pub struct ChainDump<'a> {
    table: Option<&'a Table>,
    start: EntryIndex,
}

impl<'a> ChainDump<'a> {
    pub fn new(table: Option<&'a Table>, start: EntryIndex) -> Self {
        Self { table, start }
    }
}

impl fmt::Display for ChainDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CHAIN [")?;
        match self.table {
            Some(table) if table.get(self.start).is_some() => {
                for entry in table.chain(self.start) {
                    write!(f, "{}", EntryDump(Some(entry)))?;
                }
            }
            _ => write!(f, "{}", EntryDump(None))?,
        }
        writeln!(f, "]")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&TableDump(Some(self)), f)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&EntryDump(Some(self)), f)
    }
}

pub fn write_table<W: io::Write>(out: &mut W, table: Option<&Table>) -> io::Result<()> {
    write!(out, "{}", TableDump(table))
}

pub fn write_entry<W: io::Write>(out: &mut W, entry: Option<&Entry>) -> io::Result<()> {
    write!(out, "{}", EntryDump(entry))
}

pub fn write_chain<W: io::Write>(
    out: &mut W,
    table: Option<&Table>,
    start: EntryIndex,
) -> io::Result<()> {
    write!(out, "{}", ChainDump::new(table, start))
}
