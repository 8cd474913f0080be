/// Dataset assembly: validated rows into a column-oriented table.
///
/// Pure reorganization — filtering already happened in `validate`, so this
/// stage must not drop or reorder anything. Row *i* of every column refers
/// to the same detection, in discovery (filter) order; the scorer and the
/// report both rely on that alignment.

use crate::model::{AreaRecord, ValidatedArea};

/// Column-oriented table of scoring inputs. All columns have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Source area record per row, for the report's reference column.
    pub sources: Vec<AreaRecord>,
    pub median_household_income: Vec<f64>,
    pub median_home_value: Vec<f64>,
    pub population_density: Vec<f64>,
    pub housing_units: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Assembles validated rows into a `Dataset`, preserving input order exactly.
pub fn build_dataset(rows: Vec<ValidatedArea>) -> Dataset {
    let mut dataset = Dataset {
        sources: Vec::with_capacity(rows.len()),
        median_household_income: Vec::with_capacity(rows.len()),
        median_home_value: Vec::with_capacity(rows.len()),
        population_density: Vec::with_capacity(rows.len()),
        housing_units: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        dataset.median_household_income.push(row.median_household_income);
        dataset.median_home_value.push(row.median_home_value);
        dataset.population_density.push(row.population_density);
        dataset.housing_units.push(row.housing_units);
        dataset.sources.push(row.source);
    }

    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(zipcode: &str, income: f64) -> ValidatedArea {
        ValidatedArea {
            median_household_income: income,
            median_home_value: 250_000.0,
            population_density: 120.0,
            housing_units: 900.0,
            house_age: None,
            degrees: None,
            earnings: None,
            source: AreaRecord {
                zipcode: zipcode.to_string(),
                major_city: None,
                attributes: HashMap::new(),
                house_age: Vec::new(),
                degrees: Vec::new(),
                earnings: Vec::new(),
            },
        }
    }

    #[test]
    fn test_build_dataset_length_matches_input() {
        let rows = vec![row("95448", 66_287.0), row("95441", 60_417.0)];
        let dataset = build_dataset(rows);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.sources.len(), 2);
        assert_eq!(dataset.median_household_income.len(), 2);
        assert_eq!(dataset.median_home_value.len(), 2);
        assert_eq!(dataset.population_density.len(), 2);
        assert_eq!(dataset.housing_units.len(), 2);
    }

    #[test]
    fn test_build_dataset_preserves_row_order_exactly() {
        let rows = vec![
            row("95448", 66_287.0),
            row("89049", 31_060.0),
            row("95441", 60_417.0),
        ];
        let dataset = build_dataset(rows);

        let zipcodes: Vec<&str> = dataset.sources.iter().map(|s| s.zipcode.as_str()).collect();
        assert_eq!(zipcodes, vec!["95448", "89049", "95441"]);
        assert_eq!(
            dataset.median_household_income,
            vec![66_287.0, 31_060.0, 60_417.0],
            "column values must stay aligned with their rows"
        );
    }

    #[test]
    fn test_build_dataset_never_filters() {
        // Even degenerate values pass through; filtering is not this stage's job.
        let mut odd = row("00000", 0.0);
        odd.housing_units = 0.0;

        let dataset = build_dataset(vec![odd]);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_build_dataset_empty_input_is_empty_table() {
        let dataset = build_dataset(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }
}
