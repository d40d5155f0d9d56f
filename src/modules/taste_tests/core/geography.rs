use crate::modules::taste_tests::core::record::TasteTestRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTally {
    pub country_code: String,
    pub tests: usize,
    pub products: usize,
}

/// Tests and distinct products per country, busiest country first. Tests without a country are
/// left out.
pub fn country_distribution(records: &[TasteTestRecord]) -> Vec<CountryTally> {
    let mut by_country: BTreeMap<&str, (usize, BTreeSet<&str>)> = BTreeMap::new();
    for record in records {
        if let Some(code) = record.country_code.as_deref() {
            let (tests, products) = by_country.entry(code).or_default();
            *tests += 1;
            products.insert(record.product_id.as_str());
        }
    }

    let mut tallies: Vec<CountryTally> = by_country
        .into_iter()
        .map(|(code, (tests, products))| CountryTally {
            country_code: code.to_string(),
            tests,
            products: products.len(),
        })
        .collect();
    tallies.sort_by(|a, b| {
        b.tests
            .cmp(&a.tests)
            .then_with(|| a.country_code.cmp(&b.country_code))
    });
    tallies
}

#[cfg(test)]
mod geography_tests {
    use super::*;
    use crate::tests::fixtures::records::TasteTestRecordBuilder;
    use rstest::rstest;

    fn tested_in(product_id: &str, country: Option<&str>) -> TasteTestRecord {
        TasteTestRecordBuilder::new()
            .product_id(product_id)
            .country_code(country.map(String::from))
            .build()
    }

    #[rstest]
    fn it_should_count_tests_and_products_per_country() {
        let records = vec![
            tested_in("oat", Some("NL")),
            tested_in("oat", Some("NL")),
            tested_in("soy", Some("NL")),
            tested_in("oat", Some("SE")),
            tested_in("rice", None),
        ];
        let tallies = country_distribution(&records);
        assert_eq!(
            tallies,
            vec![
                CountryTally {
                    country_code: "NL".into(),
                    tests: 3,
                    products: 2,
                },
                CountryTally {
                    country_code: "SE".into(),
                    tests: 1,
                    products: 1,
                },
            ]
        );
    }

    #[rstest]
    fn it_should_order_equally_busy_countries_by_code() {
        let records = vec![tested_in("oat", Some("SE")), tested_in("oat", Some("DE"))];
        let codes: Vec<String> = country_distribution(&records)
            .into_iter()
            .map(|t| t.country_code)
            .collect();
        assert_eq!(codes, vec!["DE", "SE"]);
    }
}
