//! Tests for tile generators

#[cfg(test)]
mod tests {
    use bingogen::algorithm::sampler::Weighted;
    use bingogen::content::category::CategoryId;
    use bingogen::content::generator::{LevelFilter, TileGenerator};

    // Tests level filters
    // Verified by treating an empty list as unrestricted
    #[test]
    fn test_level_filter() {
        assert!(LevelFilter::Any.allows(0));
        assert!(LevelFilter::Any.allows(42));
        assert!(LevelFilter::Only(vec![1, 3]).allows(3));
        assert!(!LevelFilter::Only(vec![1, 3]).allows(2));
        assert!(!LevelFilter::Only(Vec::new()).allows(0));
        assert_eq!(LevelFilter::default(), LevelFilter::Any);
    }

    // Tests defaults and reachable categories
    // Verified by returning only derived categories
    #[test]
    fn test_generator_defaults() {
        let mut generator = TileGenerator::new("Goal");
        assert!((generator.difficulty - 1.0).abs() < f64::EPSILON);
        assert!((Weighted::weight(&generator) - 1.0).abs() < f64::EPSILON);
        assert!(generator.reachable_categories().is_empty());

        generator.categories.insert(CategoryId::new(0));
        generator.derived_categories.insert(CategoryId::new(2));
        let reachable = generator.reachable_categories();
        assert!(reachable.contains(CategoryId::new(0)));
        assert!(reachable.contains(CategoryId::new(2)));
        assert_eq!(reachable.len(), 2);
    }
}
