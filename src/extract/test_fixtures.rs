//! Shared HTML fixtures for extraction and pipeline tests.

use std::fmt::Write;

/// A league table page with `n` club rows, mirroring the markup the site
/// serves: long/short name spans inside the club cell, eight numeric
/// cells after it, and a trailing form cell the extractor must ignore.
///
/// Row `i` (0-based) gets Played 38, Won 25-i, Drawn 6, Lost 7+i,
/// Goals_For 80-i, Goals_Conceded 30+i, Goal_Difference 50-2i and
/// Points 81-3i, so counts stay internally consistent.
pub fn league_table_html(n: usize) -> String {
    let mut rows = String::new();
    for i in 0..n {
        let i = i as i64;
        write!(
            rows,
            r#"<tr data-compseason="418">
<td class="league-table__pos">{pos}</td>
<td class="league-table__team"><a href="/clubs/{pos}">
<span class="league-table__team-name league-table__team-name--long long">Club {pos}</span>
<span class="league-table__team-name league-table__team-name--short short">CL{pos}</span>
</a>   </td>
<td>38</td> <td>{won}</td> <td>6</td> <td>{lost}</td>
<td class="hideSmall">{gf}</td> <td class="hideSmall">{ga}</td>
<td>{gd}</td>
<td class="league-table__points points">{pts}</td>
<td class="hideMed">WWDLW</td>
</tr>
<tr class="league-table__expandable"><td colspan="11"></td></tr>
"#,
            pos = i + 1,
            won = 25 - i,
            lost = 7 + i,
            gf = 80 - i,
            ga = 30 + i,
            gd = 50 - 2 * i,
            pts = 81 - 3 * i,
        )
        .unwrap();
    }
    format!(
        "<html><body><table class=\"league-table\">\
         <tbody class=\"league-table__tbody isPL\">{rows}</tbody></table></body></html>"
    )
}

/// A statistic page with one row per (team, value) pair, including the
/// badge icon span the extractor must skip over.
pub fn stats_page_html(rows: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (team, value) in rows {
        write!(
            body,
            r#"<tr class="table__row">
<td class="stats-table__rank">1</td>
<td class="stats-table__name"><a class="stats-table__cell-icon-align" href="/clubs">
<span class="badge badge-20"></span>
{team}
</a></td>
<td class="stats-table__main-stat">{value}</td>
</tr>
"#,
        )
        .unwrap();
    }
    format!(
        "<html><body><table><tbody class=\"statsTableContainer\">{body}</tbody></table></body></html>"
    )
}
