//! Tests for board layout scoring and search

#[cfg(test)]
mod tests {
    use bingogen::BingoError;
    use bingogen::algorithm::layout::{
        BoardScorer, LayerGradient, LayoutSettings, board_lines, layer_bonus, layer_indices,
        populate, score_board, score_row,
    };
    use bingogen::content::bitset::CategorySet;
    use bingogen::content::config::{CategorySpec, ConfigModel};
    use bingogen::spatial::tiles::BingoTile;
    use ndarray::Array2;
    use rand::{SeedableRng, rngs::StdRng};

    fn tile(config: &ConfigModel, text: &str, difficulty: f64, categories: &[&str]) -> BingoTile {
        let set: CategorySet = categories
            .iter()
            .filter_map(|name| config.category_id(name))
            .collect();
        BingoTile::new(text, "", difficulty, set)
    }

    fn relation_config(declared_on_first: bool, antisynergy: bool) -> bingogen::Result<ConfigModel> {
        let mut first = CategorySpec::new("A");
        let mut second = CategorySpec::new("B");
        match (declared_on_first, antisynergy) {
            (true, true) => first = first.with_antisynergy("B"),
            (true, false) => first = first.with_synergy("B"),
            (false, true) => second = second.with_antisynergy("A"),
            (false, false) => second = second.with_synergy("A"),
        }
        ConfigModel::builder().category(first).category(second).build()
    }

    // Tests line enumeration covers rows, columns and sliding diagonals
    // Verified by emitting only the main diagonals
    #[test]
    fn test_board_lines() {
        let square = board_lines(3, 3);
        assert_eq!(square.len(), 8);
        assert!(square.contains(&vec![0, 4, 8]));
        assert!(square.contains(&vec![6, 4, 2]));
        assert!(square.contains(&vec![1, 4, 7]));

        let wide = board_lines(4, 2);
        // 2 rows, 4 columns, 3 offsets in 2 directions
        assert_eq!(wide.len(), 12);
        assert!(wide.contains(&vec![2, 7]));
        assert!(wide.contains(&vec![6, 3]));

        let tall = board_lines(1, 3);
        assert_eq!(tall.len(), 1 + 3 + 6);

        assert!(board_lines(0, 5).is_empty());
    }

    // Tests layers count rings outward from the center
    // Verified by rounding the distance instead of flooring it
    #[test]
    fn test_layer_indices() {
        assert_eq!(layer_indices(3, 3), vec![1, 1, 1, 1, 0, 1, 1, 1, 1]);
        assert_eq!(
            layer_indices(4, 4),
            vec![1, 1, 1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 1]
        );
        let five = layer_indices(5, 5);
        assert_eq!(five.get(12), Some(&0));
        assert_eq!(five.get(6), Some(&1));
        assert_eq!(five.first(), Some(&2));
        assert_eq!(layer_indices(2, 1), vec![0, 0]);
    }

    // Tests relation scores don't depend on which side declared the relation
    // Verified by storing relations only on the declaring category
    #[test]
    fn test_score_row_symmetric_relations() -> bingogen::Result<()> {
        for declared_on_first in [true, false] {
            let anti = relation_config(declared_on_first, true)?;
            let a = tile(&anti, "a", 1.0, &["A"]);
            let b = tile(&anti, "b", 1.0, &["B"]);
            assert_eq!(score_row(&[&a, &b], anti.relation_pairs()), -10);
            assert_eq!(score_row(&[&b, &a], anti.relation_pairs()), -10);

            let syn = relation_config(declared_on_first, false)?;
            let a = tile(&syn, "a", 1.0, &["A"]);
            let b = tile(&syn, "b", 1.0, &["B"]);
            assert_eq!(score_row(&[&a, &b], syn.relation_pairs()), 4);
        }
        Ok(())
    }

    // Tests a pair counts once per line and only across distinct tiles
    // Verified by counting every pair of tile occurrences
    #[test]
    fn test_score_row_counts_pairs_once() -> bingogen::Result<()> {
        let config = relation_config(true, true)?;
        let a = tile(&config, "a", 1.0, &["A"]);
        let b = tile(&config, "b", 1.0, &["B"]);
        let both = tile(&config, "both", 1.0, &["A", "B"]);
        let plain = tile(&config, "plain", 1.0, &[]);
        let pairs = config.relation_pairs();

        assert_eq!(score_row(&[&a, &b, &a, &b], pairs), -10);
        assert_eq!(score_row(&[&both, &plain], pairs), 0);
        assert_eq!(score_row(&[&both, &a], pairs), -10);
        assert_eq!(score_row(&[&a, &plain, &plain], pairs), 0);
        assert_eq!(score_row(&[], pairs), 0);
        Ok(())
    }

    // Tests a category related to itself needs two tiles on the line
    // Verified by accepting a single carrying tile
    #[test]
    fn test_score_row_self_relation() -> bingogen::Result<()> {
        let config = ConfigModel::builder()
            .category(CategorySpec::new("Solo").with_antisynergy("Solo"))
            .build()?;
        let solo = tile(&config, "solo", 1.0, &["Solo"]);
        let other = tile(&config, "other", 1.0, &["Solo"]);
        let pairs = config.relation_pairs();

        assert_eq!(score_row(&[&solo], pairs), 0);
        assert_eq!(score_row(&[&solo, &other], pairs), -10);
        Ok(())
    }

    // Tests layer means are compared in the gradient's direction
    // Verified by swapping the comparison of adjacent layers
    #[test]
    fn test_layer_bonus_direction() -> bingogen::Result<()> {
        let config = ConfigModel::builder().build()?;
        let easy = tile(&config, "easy", 1.0, &[]);
        let hard = tile(&config, "hard", 3.0, &[]);
        let layers = layer_indices(3, 3);

        let hard_edges: Vec<&BingoTile> = (0..9)
            .map(|index| if index == 4 { &easy } else { &hard })
            .collect();
        assert_eq!(layer_bonus(&hard_edges, &layers, LayerGradient::OutwardIncreasing), 5);
        assert_eq!(layer_bonus(&hard_edges, &layers, LayerGradient::InwardIncreasing), -2);

        let hard_center: Vec<&BingoTile> = (0..9)
            .map(|index| if index == 4 { &hard } else { &easy })
            .collect();
        assert_eq!(layer_bonus(&hard_center, &layers, LayerGradient::OutwardIncreasing), -2);
        assert_eq!(layer_bonus(&hard_center, &layers, LayerGradient::InwardIncreasing), 5);

        // Equal means follow either gradient
        let flat = vec![&easy; 9];
        assert_eq!(layer_bonus(&flat, &layers, LayerGradient::InwardIncreasing), 5);
        assert_eq!(layer_bonus(&[&easy], &[0], LayerGradient::OutwardIncreasing), 0);
        Ok(())
    }

    // Tests the scorer and grid scoring agree on the same arrangement
    // Verified by scoring the grid in column-major order
    #[test]
    fn test_score_board_matches_scorer() -> Result<(), Box<dyn std::error::Error>> {
        let config = relation_config(true, true)?;
        let a = tile(&config, "a", 1.0, &["A"]);
        let b = tile(&config, "b", 1.0, &["B"]);
        let plain = tile(&config, "plain", 1.0, &[]);

        // a and b share only the top row of a 3x2 board
        let cells = vec![
            a,
            plain.clone(),
            b,
            plain.clone(),
            plain.clone(),
            plain,
        ];
        let grid = Array2::from_shape_vec((2, 3), cells.clone())?;
        let refs: Vec<&BingoTile> = cells.iter().collect();

        let scorer = BoardScorer::new(&config, 3, 2, LayerGradient::OutwardIncreasing);
        let expected = scorer.score(&refs);
        assert_eq!(score_board(&grid, &config, LayerGradient::OutwardIncreasing), expected);
        // Row clash plus the bonus for flat layer difficulty
        assert_eq!(expected, -5);
        Ok(())
    }

    // Tests layout search keeps the tile multiset and avoids clashing lines
    // Verified by keeping the first shuffle
    #[test]
    fn test_populate_separates_antisynergies() -> bingogen::Result<()> {
        let config = relation_config(true, true)?;
        let mut tiles = vec![
            tile(&config, "a", 1.0, &["A"]),
            tile(&config, "b", 1.0, &["B"]),
        ];
        for index in 0..7 {
            tiles.push(tile(&config, &format!("plain {index}"), 1.0, &[]));
        }
        let mut rng = StdRng::seed_from_u64(42);

        let grid = populate(&tiles, 3, 3, &config, LayoutSettings::default(), &mut rng)?;

        assert_eq!(grid.dim(), (3, 3));
        let mut placed: Vec<&str> = grid.iter().map(|tile| tile.text.as_str()).collect();
        let mut original: Vec<&str> = tiles.iter().map(|tile| tile.text.as_str()).collect();
        placed.sort_unstable();
        original.sort_unstable();
        assert_eq!(placed, original);

        // Flat difficulty earns the layer bonus, and no line holds both a and b
        assert_eq!(score_board(&grid, &config, LayerGradient::OutwardIncreasing), 5);
        Ok(())
    }

    // Tests a tile count different from the board size is rejected
    // Verified by truncating the pool to the board size
    #[test]
    fn test_populate_rejects_wrong_count() -> bingogen::Result<()> {
        let config = ConfigModel::builder().build()?;
        let tiles = vec![tile(&config, "only", 1.0, &[]); 3];
        let mut rng = StdRng::seed_from_u64(1);

        let result = populate(&tiles, 2, 2, &config, LayoutSettings::default(), &mut rng);

        assert!(matches!(
            result,
            Err(BingoError::BoardShape {
                expected: (2, 2),
                actual: 3
            })
        ));
        Ok(())
    }

    // Tests zero trials still produce an arrangement
    // Verified by looping exactly `trials` times
    #[test]
    fn test_populate_with_zero_trials() -> bingogen::Result<()> {
        let config = ConfigModel::builder().build()?;
        let tiles: Vec<BingoTile> = (0..4)
            .map(|index| tile(&config, &index.to_string(), 1.0, &[]))
            .collect();
        let settings = LayoutSettings {
            trials: 0,
            gradient: LayerGradient::InwardIncreasing,
        };
        let mut rng = StdRng::seed_from_u64(1);

        let grid = populate(&tiles, 2, 2, &config, settings, &mut rng)?;

        assert_eq!(grid.len(), 4);
        Ok(())
    }
}
