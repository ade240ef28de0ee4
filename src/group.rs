use itertools::Itertools;
use polars::{
    frame::DataFrame,
    lazy::{
        dsl::{col, lit},
        frame::LazyFrame,
    },
};

use crate::frame::category_names;

struct GroupColumn {
    name: String,
    categories: Vec<String>,
}

/// Splits a frame along one or more category columns, one split per
/// combination of category values.
pub struct ChannelGroups {
    columns: Vec<GroupColumn>,
}

impl ChannelGroups {
    pub fn from_frame(df: &DataFrame, column_names: Vec<String>) -> anyhow::Result<Self> {
        let mut columns = vec![];
        for name in column_names {
            let categories = category_names(df, &name)?;
            columns.push(GroupColumn { name, categories });
        }
        Ok(Self { columns })
    }

    /// Visit every combination, handing the callback the frame filtered down
    /// to it and a trace label such as `H1/observing`.
    pub fn for_each_split(
        &self,
        df: LazyFrame,
        mut f: impl FnMut(LazyFrame, &str) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let combinations = self
            .columns
            .iter()
            .map(|column| {
                column
                    .categories
                    .iter()
                    .map(move |category| (column.name.as_str(), category.as_str()))
            })
            .multi_cartesian_product();
        for combination in combinations {
            let mut df = df.clone();
            for (name, category) in &combination {
                df = df.filter(col(*name).eq(lit(*category)));
            }
            let label = combination.iter().map(|(_, category)| *category).join("/");
            f(df, &label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polars::{df, lazy::frame::IntoLazy};

    use super::*;

    #[test]
    fn splits_cover_the_cartesian_product() {
        let df = df!(
            "ifo" => ["H1", "H1", "L1", "L1"],
            "state" => ["observing", "down", "observing", "down"],
            "strain" => [1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let groups =
            ChannelGroups::from_frame(&df, vec!["ifo".to_string(), "state".to_string()]).unwrap();

        let mut labels = vec![];
        groups
            .for_each_split(df.clone().lazy(), |split, label| {
                assert_eq!(split.collect()?.height(), 1);
                labels.push(label.to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(
            labels,
            vec!["H1/observing", "H1/down", "L1/observing", "L1/down"]
        );
    }

    #[test]
    fn missing_group_column_fails() {
        let df = df!("strain" => [1.0]).unwrap();
        assert!(ChannelGroups::from_frame(&df, vec!["ifo".to_string()]).is_err());
    }
}
