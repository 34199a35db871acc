//! CSV export of the ledger listings.
//!
//! Files start with a UTF-8 byte order mark so spreadsheet applications pick up the Korean
//! headers, missing values are written as `-`.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use fleet_core::{Auction, Expense, LedgerKind, PrivateSale, format_timestamp};
use snafu::ResultExt;
use tracing::info;

use crate::{
    error::{CsvSnafu, IoSnafu},
    format::format_optional,
    ledgers::LedgerLists,
};

const BOM: &[u8] = b"\xEF\xBB\xBF";

pub trait ExportRow {
    const HEADERS: &'static [&'static str];

    fn record(&self) -> Vec<String>;
}

impl ExportRow for Auction {
    const HEADERS: &'static [&'static str] = &[
        "위판일시",
        "선박명",
        "위판장",
        "어종",
        "수량(kg)",
        "단가",
        "금액",
        "구매자",
        "비고",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.auction_date),
            format_optional(self.vessel_name.as_deref()).to_string(),
            self.auction_port.clone(),
            self.fish_species.clone(),
            self.quantity.to_string(),
            self.unit_price.to_string(),
            self.total_price.to_string(),
            format_optional(self.buyer.as_deref()).to_string(),
            format_optional(self.note.as_deref()).to_string(),
        ]
    }
}

impl ExportRow for PrivateSale {
    const HEADERS: &'static [&'static str] = &[
        "판매일시",
        "선박명",
        "어종",
        "수량(kg)",
        "단가",
        "금액",
        "구매자",
        "비고",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.sale_date),
            format_optional(self.vessel_name.as_deref()).to_string(),
            self.fish_species.clone(),
            self.quantity.to_string(),
            self.unit_price.to_string(),
            self.total_price.to_string(),
            format_optional(self.buyer.as_deref()).to_string(),
            format_optional(self.note.as_deref()).to_string(),
        ]
    }
}

impl ExportRow for Expense {
    const HEADERS: &'static [&'static str] =
        &["지출일시", "선박명", "카테고리", "내용", "금액", "비고"];

    fn record(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.expense_date),
            format_optional(self.vessel_name.as_deref()).to_string(),
            self.category.to_string(),
            format_optional(self.description.as_deref()).to_string(),
            self.amount.to_string(),
            format_optional(self.note.as_deref()).to_string(),
        ]
    }
}

/// Writes `rows` as CSV into `writer` and hands the writer back.
pub fn write_csv<W: Write, T: ExportRow>(mut writer: W, rows: &[T]) -> Result<W, csv::Error> {
    writer.write_all(BOM)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(T::HEADERS)?;
    for row in rows {
        csv.write_record(row.record())?;
    }

    csv.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Writes the ledger of `kind` from `lists` into `writer`.
pub fn write_ledger<W: Write>(
    writer: W,
    lists: &LedgerLists,
    kind: LedgerKind,
) -> Result<W, csv::Error> {
    match kind {
        LedgerKind::Auction => write_csv(writer, &lists.auctions),
        LedgerKind::PrivateSale => write_csv(writer, &lists.private_sales),
        LedgerKind::Expense => write_csv(writer, &lists.expenses),
    }
}

/// E.g. `위판내역_2025-01-13.csv`.
pub fn file_name(kind: LedgerKind, date: NaiveDate) -> String {
    format!("{}내역_{}.csv", kind.label(), date.format("%Y-%m-%d"))
}

/// Exports the ledger of `kind` into `dir`, returns the path of the written file.
pub fn export_ledger(
    dir: &Path,
    lists: &LedgerLists,
    kind: LedgerKind,
    date: NaiveDate,
) -> crate::Result<PathBuf> {
    std::fs::create_dir_all(dir).context(IoSnafu { path: dir })?;

    let path = dir.join(file_name(kind, date));
    let file = File::create(&path).context(IoSnafu { path: &path })?;

    let mut writer = write_ledger(BufWriter::new(file), lists, kind).context(CsvSnafu)?;
    writer.flush().context(IoSnafu { path: &path })?;

    info!("exported {} {} rows to {}", lists.len(kind), kind.label(), path.display());
    Ok(path)
}
