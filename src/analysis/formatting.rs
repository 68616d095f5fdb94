pub const MISSING: &str = "n/a";

/// `$1,234.50` style; negatives keep the sign after the dollar (`$-135.00`).
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("${}", group_thousands(&format!("{:.2}", value)))
}

pub fn format_optional_usd(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| MISSING.to_string())
}

/// Plain quantity with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    group_thousands(&format!("{:.2}", value))
}

/// Inserts `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac_part) => format!("{}{}.{}", sign, grouped, frac_part),
        None => format!("{}{}", sign, grouped),
    }
}

/// Renders rows as a plain text table: right-aligned columns separated by a space.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(headers.to_vec()));
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
