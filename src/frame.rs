use anyhow::Context;
use polars::{frame::DataFrame, prelude::Column};

/// Channel samples as floats, casting integer columns on the way. Nulls stay
/// nulls so gaps survive into the figure.
pub fn float_values(column: &Column) -> anyhow::Result<Vec<Option<f64>>> {
    let values = column
        .as_materialized_series()
        .to_float()?
        .f64()?
        .to_vec();
    Ok(values)
}

pub fn string_values(column: &Column) -> anyhow::Result<Vec<String>> {
    let values = column
        .str()?
        .into_iter()
        .map(|x| {
            x.map(|s| s.to_string())
                .with_context(|| format!("No string in the column `{}`", column.name()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}

/// Distinct values of a grouping column, first-seen order.
pub fn category_names(df: &DataFrame, column_name: &str) -> anyhow::Result<Vec<String>> {
    let column = df.column(column_name)?;
    let categories = column.unique_stable()?;
    let names = categories
        .str()?
        .into_iter()
        .filter_map(|x| x.map(|s| s.to_string()))
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn integer_channels_cast_to_float() {
        let df = df!("counts" => [1i64, 2, 3]).unwrap();
        let values = float_values(df.column("counts").unwrap()).unwrap();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn string_channel_is_not_numeric() {
        let df = df!("ifo" => ["H1", "L1"]).unwrap();
        assert!(float_values(df.column("ifo").unwrap()).is_err());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let df = df!("ifo" => ["L1", "H1", "L1", "V1"]).unwrap();
        let names = category_names(&df, "ifo").unwrap();
        assert_eq!(names, vec!["L1", "H1", "V1"]);
    }
}
