// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub const ROWS: u32 = 30;
pub const COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Deterministic stand-in for other passengers.
pub fn is_taken(row: u32, column: char) -> bool {
    (row * 7 + column as u32) % 5 == 0
}

pub fn seat_id(row: u32, column: char) -> String {
    format!("{}{}", row, column)
}

/// "12a" -> (12, 'A'). Rows outside the cabin or unknown letters give `None`.
pub fn parse_seat(id: &str) -> Option<(u32, char)> {
    let id = id.trim();
    let column = id.chars().last()?.to_ascii_uppercase();
    let row: u32 = id[..id.len() - column.len_utf8()].parse().ok()?;
    if !(1..=ROWS).contains(&row) || !COLUMNS.contains(&column) {
        return None;
    }
    Some((row, column))
}

/// Canonical form of a free seat id, ready for the session.
pub fn claim(id: &str) -> Result<String, String> {
    match parse_seat(id) {
        Some((row, column)) if is_taken(row, column) => {
            Err(format!("Seat {} is already taken", seat_id(row, column)))
        }
        Some((row, column)) => Ok(seat_id(row, column)),
        None => Err(format!(
            "No seat '{}' on this aircraft (rows 1-{}, seats A-D)",
            id.trim(),
            ROWS
        )),
    }
}

pub fn free_seats() -> impl Iterator<Item = String> {
    (1..=ROWS).flat_map(|row| {
        COLUMNS
            .iter()
            .filter(move |&&c| !is_taken(row, c))
            .map(move |&c| seat_id(row, c))
    })
}

/// Text cabin plan. `[ ]` free, `[x]` taken, `[*]` the selected seat.
pub fn render(selected: Option<&str>) -> String {
    let selected = selected.and_then(parse_seat);
    let mut out = String::from("      A   B     C   D\n");
    for row in 1..=ROWS {
        out.push_str(&format!("{:>3}  ", row));
        for (i, &column) in COLUMNS.iter().enumerate() {
            if i == 2 {
                out.push_str("  ");
            }
            let cell = if selected == Some((row, column)) {
                "[*]"
            } else if is_taken(row, column) {
                "[x]"
            } else {
                "[ ]"
            };
            out.push_str(cell);
            out.push(' ');
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}
