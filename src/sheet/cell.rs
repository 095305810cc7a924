// ============================================================================
// Cellules : valeurs lues dans le classeur et conversions
// ============================================================================
// Calamine renvoie des cellules `Data` (nombre, texte, date Excel...).
// On les convertit en `CellValue`, puis on les interprète en date ou en prix.
//
// CONCEPTS RUST :
// 1. Enum avec données : une cellule a un seul type à la fois
// 2. From trait : conversion idiomatique Data -> CellValue
// 3. Option chaining avec ? et .or_else()
// ============================================================================

use std::fmt;

use calamine::Data;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::error::DataFormatError;

/// Formats de date texte acceptés (jour seul)
///
/// CONCEPT : Ordre d'essai
/// - ISO d'abord (le cas normal)
/// - puis les formats européens et US les plus courants
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Formats date + heure acceptés (l'heure est ignorée)
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Valeur d'une cellule, indépendante de la bibliothèque de lecture
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Cellule vide
    Empty,

    /// Nombre (entier ou flottant Excel)
    Number(f64),

    /// Texte brut
    Text(String),

    /// Booléen (VRAI/FAUX)
    Bool(bool),

    /// Date Excel déjà décodée
    DateTime(NaiveDateTime),

    /// Erreur Excel (#DIV/0!, #N/A...)
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Interprète la cellule comme un prix
    ///
    /// Règle stricte : un texte n'est accepté que s'il contient un nombre
    /// (ex: "151.30"). Tout le reste est une DataFormatError.
    pub fn to_price(&self, row: usize) -> Result<f64, DataFormatError> {
        let price = match self {
            CellValue::Number(value) => *value,
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(DataFormatError::MissingValue { row, column: "price" });
                }
                trimmed.parse::<f64>().map_err(|_| DataFormatError::NonNumericPrice {
                    row,
                    value: trimmed.to_string(),
                })?
            }
            CellValue::Empty => {
                return Err(DataFormatError::MissingValue { row, column: "price" });
            }
            other => {
                return Err(DataFormatError::NonNumericPrice {
                    row,
                    value: other.to_string(),
                });
            }
        };

        if !price.is_finite() {
            return Err(DataFormatError::NonFinitePrice {
                row,
                value: self.to_string(),
            });
        }

        Ok(price)
    }

    /// Interprète la cellule comme une date calendaire
    pub fn to_date(&self, row: usize) -> Result<NaiveDate, DataFormatError> {
        let unparseable = || DataFormatError::UnparseableDate {
            row,
            value: self.to_string(),
        };

        match self {
            CellValue::DateTime(datetime) => Ok(datetime.date()),
            // Un nombre dans la colonne date : numéro de série Excel
            CellValue::Number(serial) => excel_serial_to_date(*serial).ok_or_else(unparseable),
            CellValue::Text(text) if text.trim().is_empty() => {
                Err(DataFormatError::MissingValue { row, column: "date" })
            }
            CellValue::Text(text) => parse_date_text(text).ok_or_else(unparseable),
            CellValue::Empty => Err(DataFormatError::MissingValue { row, column: "date" }),
            CellValue::Bool(_) | CellValue::Error(_) => Err(unparseable()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::DateTime(datetime) => write!(f, "{}", datetime),
            CellValue::Error(error) => write!(f, "{}", error),
        }
    }
}

// ============================================================================
// Conversion depuis calamine
// ============================================================================

impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => CellValue::Empty,
            Data::Int(v) => CellValue::Number(*v as f64),
            Data::Float(v) => CellValue::Number(*v),
            Data::String(v) => CellValue::Text(v.clone()),
            Data::Bool(v) => CellValue::Bool(*v),
            Data::DateTime(v) => v
                .as_datetime()
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::Number(v.as_f64())),
            Data::DateTimeIso(v) => CellValue::Text(v.clone()),
            Data::DurationIso(v) => CellValue::Text(v.clone()),
            Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        }
    }
}

// ============================================================================
// Helpers de parsing
// ============================================================================

/// Parse une date texte dans un des formats acceptés
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Série du 29/02/1900, jour inexistant hérité de Lotus 1-2-3
const FICTITIOUS_LEAP_DAY: i64 = 60;

/// Convertit un numéro de série Excel (système 1900) en date
///
/// CONCEPT : Bug historique de Lotus 1-2-3
/// - Excel considère 1900 comme bissextile (29/02/1900 = série 60)
/// - Après la série 60, l'origine effective est le 30/12/1899
/// - Avant, c'est le 31/12/1899
/// - La série 60 elle-même n'a pas de date réelle : None
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }

    let days = serial.floor() as i64;
    if days == FICTITIOUS_LEAP_DAY {
        return None;
    }

    let origin = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    origin.checked_add_signed(Duration::try_days(days)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_price_from_number_and_numeric_text() {
        assert_eq!(CellValue::Number(150.25).to_price(2), Ok(150.25));
        assert_eq!(CellValue::Text(" 151.30 ".to_string()).to_price(2), Ok(151.30));
    }

    #[test]
    fn test_price_rejects_non_numeric() {
        assert_eq!(
            CellValue::Text("n/a".to_string()).to_price(4),
            Err(DataFormatError::NonNumericPrice { row: 4, value: "n/a".to_string() })
        );
        assert!(matches!(
            CellValue::Bool(true).to_price(2),
            Err(DataFormatError::NonNumericPrice { .. })
        ));
        assert_eq!(
            CellValue::Empty.to_price(7),
            Err(DataFormatError::MissingValue { row: 7, column: "price" })
        );
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert!(matches!(
            CellValue::Number(f64::NAN).to_price(2),
            Err(DataFormatError::NonFinitePrice { .. })
        ));
        assert!(matches!(
            CellValue::Text("inf".to_string()).to_price(2),
            Err(DataFormatError::NonFinitePrice { .. })
        ));
    }

    #[test]
    fn test_date_text_formats() {
        assert_eq!(parse_date_text("2024-01-02"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("2024/01/02"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("02.01.2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("01/02/2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("2024-01-02 15:30:00"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("2024-01-02T15:30:00"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("2024-01-02T23:30:00+02:00"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("yesterday"), None);
    }

    #[test]
    fn test_excel_serials() {
        assert_eq!(excel_serial_to_date(1.0), Some(ymd(1900, 1, 1)));
        assert_eq!(excel_serial_to_date(59.0), Some(ymd(1900, 2, 28)));
        assert_eq!(excel_serial_to_date(61.0), Some(ymd(1900, 3, 1)));
        assert_eq!(excel_serial_to_date(45292.0), Some(ymd(2024, 1, 1)));
        // La partie décimale (l'heure) est ignorée
        assert_eq!(excel_serial_to_date(45292.75), Some(ymd(2024, 1, 1)));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_excel_leap_day_1900_is_unparseable() {
        assert_eq!(excel_serial_to_date(60.0), None);
        assert_eq!(
            CellValue::Number(60.0).to_date(2),
            Err(DataFormatError::UnparseableDate { row: 2, value: "60".to_string() })
        );
    }

    #[test]
    fn test_to_date_errors() {
        assert_eq!(
            CellValue::Text("not a date".to_string()).to_date(3),
            Err(DataFormatError::UnparseableDate { row: 3, value: "not a date".to_string() })
        );
        assert_eq!(
            CellValue::Empty.to_date(5),
            Err(DataFormatError::MissingValue { row: 5, column: "date" })
        );
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(CellValue::from(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            CellValue::from(&Data::String("price".to_string())),
            CellValue::Text("price".to_string())
        );
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
    }
}
