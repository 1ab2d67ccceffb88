//! Weight tables and weighted sampling.
//!
//! A table lays its categories end to end: each label owns the half-open
//! sub-range `[low, low + weight)` of `[0, total)`, in declaration order.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValleyError};

use super::seed::SeedCursor;

/// Ordered mapping from category label to integer weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, u32)>", into = "Vec<(String, u32)>")]
pub struct WeightTable {
    entries: Vec<(String, u32)>,
    total: u32,
}

impl WeightTable {
    /// Build a table from ordered `(label, weight)` pairs.
    ///
    /// Labels must be unique and at least one weight must be non-zero.
    pub fn new(entries: Vec<(String, u32)>) -> Result<Self> {
        for (i, (label, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == label) {
                return Err(ValleyError::Config {
                    message: format!("Duplicate weight table label: {}", label),
                    help: None,
                });
            }
        }

        let total = entries
            .iter()
            .try_fold(0u32, |sum, (_, w)| sum.checked_add(*w))
            .ok_or_else(|| ValleyError::Config {
                message: "Weight table total overflows".to_string(),
                help: Some("Weights must sum to at most 4294967295".to_string()),
            })?;
        if total == 0 {
            return Err(ValleyError::Config {
                message: "Weight table has no weight".to_string(),
                help: Some("Give at least one category a non-zero weight".to_string()),
            });
        }

        Ok(Self { entries, total })
    }

    /// Convenience constructor from borrowed pairs.
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Result<Self> {
        Self::new(pairs.iter().map(|(l, w)| (l.to_string(), *w)).collect())
    }

    /// Declared total; sub-ranges tile `[0, total)`.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Half-open sub-ranges in declaration order.
    pub fn ranges(&self) -> impl Iterator<Item = (&str, std::ops::Range<u32>)> {
        self.entries.iter().scan(0u32, |low, (label, weight)| {
            let range = *low..*low + weight;
            *low += weight;
            Some((label.as_str(), range))
        })
    }

    /// Find the category whose sub-range contains `value`.
    ///
    /// A value on a boundary belongs to the higher category. Values at or
    /// past `total` fall into the last non-empty category.
    pub fn lookup(&self, value: u32) -> &str {
        let mut last_non_empty = self.entries[0].0.as_str();
        for (label, range) in self.ranges() {
            if range.contains(&value) {
                return label;
            }
            if !range.is_empty() {
                last_non_empty = label;
            }
        }
        last_non_empty
    }

    /// Copy of this table without `label`.
    pub fn without(&self, label: &str) -> Result<Self> {
        Self::new(
            self.entries
                .iter()
                .filter(|(l, _)| l != label)
                .cloned()
                .collect(),
        )
    }

    /// Rescale the weights so the sub-ranges exactly tile `[low, high)`.
    ///
    /// Boundaries are placed at the rounded cumulative proportion, so the
    /// rescaled weights always sum to `high - low`.
    pub fn map_to_range(&self, low: u32, high: u32) -> Result<Self> {
        if high <= low {
            return Err(ValleyError::Config {
                message: format!("Cannot map weights onto empty range [{}, {})", low, high),
                help: None,
            });
        }

        let span = u64::from(high - low);
        let total = u64::from(self.total);
        let mut cumulative = 0u64;
        let mut previous = 0u64;
        let mut entries = Vec::with_capacity(self.entries.len());

        for (label, weight) in &self.entries {
            cumulative += u64::from(*weight);
            let boundary = (cumulative * span + total / 2) / total;
            entries.push((label.clone(), (boundary - previous) as u32));
            previous = boundary;
        }

        Self::new(entries)
    }
}

impl TryFrom<Vec<(String, u32)>> for WeightTable {
    type Error = ValleyError;

    fn try_from(entries: Vec<(String, u32)>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<WeightTable> for Vec<(String, u32)> {
    fn from(table: WeightTable) -> Self {
        table.entries
    }
}

/// Draw one category from `table`, consuming exactly one seed byte.
pub fn sample<'t>(table: &'t WeightTable, cursor: &mut SeedCursor<'_>) -> Result<&'t str> {
    let value = cursor.take(table.total())?;
    Ok(table.lookup(u32::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalogue;
    use crate::sampler::seed::{Seed, SAMPLE_RANGE};

    fn colours() -> WeightTable {
        WeightTable::from_pairs(&[
            ("Pink", 50),
            ("Peach", 45),
            ("Brown", 40),
            ("White", 35),
            ("Lime", 35),
            ("Black", 25),
            ("Red", 20),
            ("Gold", 3),
            ("Diamond", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_boundaries_belong_to_higher_category() {
        let table = WeightTable::from_pairs(&[("A", 10), ("B", 20), ("C", 225)]).unwrap();
        assert_eq!(table.lookup(0), "A");
        assert_eq!(table.lookup(9), "A");
        assert_eq!(table.lookup(10), "B");
        assert_eq!(table.lookup(29), "B");
        assert_eq!(table.lookup(30), "C");
        assert_eq!(table.lookup(254), "C");
    }

    #[test]
    fn test_lookup_past_total_uses_last_non_empty() {
        let table = WeightTable::from_pairs(&[("A", 200), ("B", 55), ("Z", 0)]).unwrap();
        assert_eq!(table.lookup(255), "B");
    }

    #[test]
    fn test_every_value_maps_to_exactly_one_range() {
        let table = colours();
        for value in 0..table.total() {
            let owners = table.ranges().filter(|(_, r)| r.contains(&value)).count();
            assert_eq!(owners, 1, "value {} owned by {} ranges", value, owners);
        }
    }

    #[test]
    fn test_builtin_tables_cover_every_sample_value() {
        let catalogue = Catalogue::builtin().unwrap();
        for (name, table) in catalogue.tables.named() {
            for value in 0..SAMPLE_RANGE {
                let owners = table.ranges().filter(|(_, r)| r.contains(&value)).count();
                assert_eq!(owners, 1, "table {} value {} owned by {} ranges", name, value, owners);
            }
        }
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(WeightTable::from_pairs(&[("A", 1), ("A", 2)]).is_err());
        assert!(WeightTable::from_pairs(&[("A", 0)]).is_err());
        assert!(WeightTable::from_pairs(&[]).is_err());
    }

    #[test]
    fn test_rejects_overflowing_total() {
        let err = WeightTable::from_pairs(&[("A", u32::MAX), ("B", 1)]).unwrap_err();
        assert!(matches!(err, ValleyError::Config { .. }));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_map_to_range_tiles_exactly() {
        let secondary = colours().without("Pink").unwrap().map_to_range(0, 255).unwrap();
        assert_eq!(secondary.total(), 255);
        let ranges: Vec<_> = secondary.ranges().map(|(l, r)| (l.to_string(), r)).collect();
        assert_eq!(
            ranges,
            vec![
                ("Peach".to_string(), 0..56),
                ("Brown".to_string(), 56..106),
                ("White".to_string(), 106..149),
                ("Lime".to_string(), 149..193),
                ("Black".to_string(), 193..224),
                ("Red".to_string(), 224..249),
                ("Gold".to_string(), 249..253),
                ("Diamond".to_string(), 253..255),
            ]
        );
    }

    #[test]
    fn test_map_to_range_rejects_empty_span() {
        assert!(colours().map_to_range(10, 10).is_err());
    }

    #[test]
    fn test_sample_consumes_one_byte() {
        let table = colours();
        let seed = Seed::new(vec![49, 50, 254]);
        let mut cursor = seed.cursor();
        assert_eq!(sample(&table, &mut cursor).unwrap(), "Pink");
        assert_eq!(sample(&table, &mut cursor).unwrap(), "Peach");
        assert_eq!(sample(&table, &mut cursor).unwrap(), "Diamond");
        assert_eq!(cursor.consumed(), 3);
    }

    #[test]
    fn test_sample_rejects_table_with_wrong_total() {
        let table = WeightTable::from_pairs(&[("A", 100), ("B", 100)]).unwrap();
        assert_ne!(table.total(), SAMPLE_RANGE);
        let seed = Seed::new(vec![0]);
        let mut cursor = seed.cursor();
        assert!(sample(&table, &mut cursor).is_err());
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn test_deserialize_ordered_pairs() {
        let table: WeightTable = serde_yaml::from_str("- [None, 200]\n- [Split, 55]\n").unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["None", "Split"]);
        assert_eq!(table.total(), 255);
    }
}
