//! Spanish-locale rendering and CSV export of projection results
//!
//! The export format matches the plan's reference spreadsheet: semicolon
//! separators, comma decimals, Spanish month names, and the worker's age per
//! row.

use std::io::{self, Write};

use chrono::{Datelike, NaiveDate};

use crate::projection::MonthlyRecord;

/// Spanish name of a calendar month (1-12)
pub fn spanish_month_name(month: u32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "",
    }
}

/// Completed years of age on a given date
pub fn age_at(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Format an amount as euros in Spanish convention: "1.234,56 €"
pub fn format_euro(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, group_thousands(cents / 100), cents % 100)
}

/// Format a number with two decimals and a comma decimal separator
pub fn format_decimal_comma(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Write monthly records as a semicolon-separated CSV with comma decimals
pub fn write_monthly_csv<W: Write>(
    mut writer: W,
    records: &[MonthlyRecord],
    birth_date: NaiveDate,
) -> io::Result<()> {
    writeln!(
        writer,
        "Año;Mes;EDAD;TESA Bruto;Acumulado Tributable;Tasa IRPF TESA (%);IRPF TESA;TESA Neto;\
         SEPE Bruto;Tasa IRPF SEPE (%);IRPF SEPE;SEPE Neto;Pensión Bruta;\
         Tasa IRPF Pensión (%);IRPF Pensión;Pensión Neta;Total Neto;Fecha"
    )?;

    for r in records {
        writeln!(
            writer,
            "{};{};{};{};{};{};{};{};{};{};{};{};{};{};{};{};{};{}",
            r.date.year(),
            spanish_month_name(r.date.month()),
            age_at(birth_date, r.date),
            format_decimal_comma(r.tesa_gross),
            format_decimal_comma(r.cumulative_tesa_gross),
            format_decimal_comma(r.tesa_tax_rate),
            format_decimal_comma(r.tesa_tax),
            format_decimal_comma(r.tesa_net),
            format_decimal_comma(r.sepe_gross),
            format_decimal_comma(r.sepe_tax_rate),
            format_decimal_comma(r.sepe_tax),
            format_decimal_comma(r.sepe_net),
            format_decimal_comma(r.pension_gross),
            format_decimal_comma(r.pension_tax_rate),
            format_decimal_comma(r.pension_tax),
            format_decimal_comma(r.pension_net),
            format_decimal_comma(r.total_net),
            r.date,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_spanish_month_names() {
        assert_eq!(spanish_month_name(1), "Enero");
        assert_eq!(spanish_month_name(6), "Junio");
        assert_eq!(spanish_month_name(11), "Noviembre");
        assert_eq!(spanish_month_name(12), "Diciembre");
    }

    #[test]
    fn test_age_at_turns_on_the_birthday() {
        let birth = ymd(1970, 3, 25);
        assert_eq!(age_at(birth, ymd(2033, 3, 24)), 62);
        assert_eq!(age_at(birth, ymd(2033, 3, 25)), 63);
        assert_eq!(age_at(birth, ymd(2033, 12, 1)), 63);
    }

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(65_919.12), "65.919,12 €");
        assert_eq!(format_euro(1_000_000.0), "1.000.000,00 €");
        assert_eq!(format_euro(0.0), "0,00 €");
        assert_eq!(format_euro(999.5), "999,50 €");
        assert_eq!(format_euro(-1_234.5), "-1.234,50 €");
    }

    #[test]
    fn test_format_decimal_comma() {
        assert_eq!(format_decimal_comma(2554.4168), "2554,42");
        assert_eq!(format_decimal_comma(13.75), "13,75");
        assert_eq!(format_decimal_comma(-960.0), "-960,00");
    }

    #[test]
    fn test_write_monthly_csv_layout() {
        let record = MonthlyRecord {
            date: ymd(2026, 3, 1),
            tesa_gross: 2554.42,
            cumulative_tesa_gross: 2554.42,
            tesa_tax_rate: 13.75,
            tesa_tax: 0.0,
            tesa_net: 2554.42,
            sepe_gross: 1181.0,
            sepe_tax_rate: 5.0,
            sepe_tax: 59.05,
            sepe_net: 1121.95,
            pension_gross: 0.0,
            pension_tax_rate: 23.0,
            pension_tax: 0.0,
            pension_net: 0.0,
            total_net: 3676.37,
        };

        let mut buffer = Vec::new();
        write_monthly_csv(&mut buffer, &[record], ymd(1970, 3, 25)).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Año;Mes;EDAD;TESA Bruto;Acumulado Tributable"));
        assert!(header.ends_with("Total Neto;Fecha"));

        assert_eq!(
            lines.next().unwrap(),
            "2026;Marzo;55;2554,42;2554,42;13,75;0,00;2554,42;\
             1181,00;5,00;59,05;1121,95;0,00;23,00;0,00;0,00;3676,37;2026-03-01"
        );
    }
}
