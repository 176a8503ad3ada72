// src/common/format.rs

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

// Formatação de exibição dos cards e tabelas. O front original fazia isso
// no render; aqui os view models já saem prontos para o cliente.

// Abreviação em lakh: ₹1.250.000 -> "₹12.5L"
pub fn lakh(value: Decimal) -> String {
    let scaled = (value / Decimal::from(100_000)).to_f64().unwrap_or(0.0);
    format!("₹{:.1}L", scaled)
}

// Abreviação em milhares: ₹10.000 -> "₹10.0k"
pub fn thousands(value: Decimal) -> String {
    let scaled = (value / Decimal::from(1_000)).to_f64().unwrap_or(0.0);
    format!("₹{:.1}k", scaled)
}

// Valor cheio com separador de milhar: "₹10,000" (equivalente ao
// toLocaleString do front). Centavos só aparecem quando existem.
pub fn full(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let int_part = abs.trunc();
    let frac_part = (abs - int_part).normalize();

    let digits = int_part.normalize().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = grouped.chars().rev().collect();

    if !frac_part.is_zero() {
        let frac = frac_part.to_string();
        // "0.25" -> ".25"
        out.push_str(frac.trim_start_matches('0'));
    }

    if negative {
        format!("-₹{}", out)
    } else {
        format!("₹{}", out)
    }
}

// Percentual arredondado para uma casa decimal
pub fn percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// Data da tabela de transações (dd/mm/aaaa)
pub fn day(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lakh_com_uma_casa() {
        assert_eq!(lakh(Decimal::from(1_250_000)), "₹12.5L");
        assert_eq!(lakh(Decimal::ZERO), "₹0.0L");
    }

    #[test]
    fn thousands_com_uma_casa() {
        assert_eq!(thousands(Decimal::from(10_000)), "₹10.0k");
        assert_eq!(thousands(Decimal::from(1_500)), "₹1.5k");
    }

    #[test]
    fn full_agrupa_milhares() {
        assert_eq!(full(Decimal::from(10_000)), "₹10,000");
        assert_eq!(full(Decimal::from(1_234_567)), "₹1,234,567");
        assert_eq!(full(Decimal::from(999)), "₹999");
        assert_eq!(full(Decimal::ZERO), "₹0");
    }

    #[test]
    fn full_mostra_centavos_quando_existem() {
        assert_eq!(full(Decimal::new(1050025, 2)), "₹10,500.25");
    }

    #[test]
    fn percent_arredonda_uma_casa() {
        assert_eq!(percent(33.333), 33.3);
        assert_eq!(percent(50.0), 50.0);
        assert_eq!(percent(66.666), 66.7);
    }

    #[test]
    fn day_formata_dd_mm_aaaa() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(day(&date), "15/01/2024");
    }
}
