use std::cmp::Ordering;
use std::iter::Sum;

/// Mean of the present values; `None` when nothing is present.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (total, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

pub fn sum<T, I>(values: I) -> T
where
    T: Sum<T>,
    I: IntoIterator<Item = T>,
{
    values.into_iter().sum()
}

/// The `n` items with the largest key, descending. Equal keys keep input order.
pub fn top_n_by<T, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let mut ranked: Vec<(f64, &T)> = items.iter().map(|item| (key(item), item)).collect();
    // sort_by is stable; NaN keys sink to the bottom
    ranked.sort_by(|a, b| match (a.0.is_nan(), b.0.is_nan()) {
        (false, false) => b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    });
    ranked.into_iter().take(n).map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::new()), None);
    }

    #[test]
    fn sum_of_floats() {
        let total: f64 = sum([2.0, 3.5]);
        assert_eq!(total, 5.5);
        let empty: f64 = sum(Vec::<f64>::new());
        assert_eq!(empty, 0.0);
    }

    #[test]
    fn top_n_is_descending_and_stable() {
        let items = [("a", 1.0), ("b", 5.0), ("c", 3.0), ("d", 5.0), ("e", f64::NAN), ("f", 0.0)];
        let top: Vec<&str> = top_n_by(&items, 4, |i| i.1).iter().map(|i| i.0).collect();
        assert_eq!(top, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn top_n_larger_than_input() {
        let items = [1.0, 2.0];
        let top = top_n_by(&items, 5, |v| *v);
        assert_eq!(top, vec![&2.0, &1.0]);
    }
}
