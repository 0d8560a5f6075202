use cobalt_engine::persistence::{Column, Record, RowId, Value};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
struct Model {
    id: RowId,
    x: i64,
    y: String,
}

impl Model {
    fn new(x: i64, y: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            x,
            y: y.to_string(),
        }
    }
}

impl Record for Model {
    fn id(&self) -> RowId {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::<Self>::new(
                "x",
                |row| Value::Integer(row.x),
                |row, value| {
                    row.x = value.into_integer()?;
                    Ok(())
                },
            ),
            Column::<Self>::new(
                "y",
                |row| Value::from(row.y.as_str()),
                |row, value| {
                    row.y = value.into_text()?;
                    Ok(())
                },
            ),
        ]
    }
}

#[cfg(test)]
mod table {
    use super::Model;
    use cobalt_engine::persistence::{Direction, RowId, StoreError, Table, Value};
    use uuid::Uuid;

    fn _create_table() -> Table<Model> {
        Table::new("models", &[]).unwrap()
    }

    fn _fill(table: &mut Table<Model>, xs: &[i64]) -> Vec<Model> {
        let models: Vec<Model> = xs.iter().map(|x| Model::new(*x, "")).collect();
        for model in models.iter() {
            table.add_row(model.clone()).unwrap();
        }
        models
    }

    #[test]
    fn table_added_rows_can_be_retrieved() {
        let mut table = _create_table();
        let model = Model::new(1, "one");
        table.add_row(model.clone()).unwrap();

        assert_eq!(table.get_by_id(&model.id).unwrap(), &model);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn table_rejects_duplicate_ids_and_keeps_first_row() {
        let mut table = _create_table();
        let first = Model::new(1, "first");
        let second = Model {
            id: first.id,
            x: 2,
            y: "second".to_string(),
        };

        table.add_row(first.clone()).unwrap();
        let result = table.add_row(second);

        assert_eq!(result, Err(StoreError::DuplicateKey(first.id)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_by_id(&first.id).unwrap(), &first);
        assert!(table.get_ids_by_column("x", &Value::Integer(2)).unwrap().is_empty());
    }

    #[test]
    fn table_row_id_can_be_retrieved_by_column_value() {
        let mut table = _create_table();
        let model = Model::new(123, "123");
        table.add_row(model.clone()).unwrap();

        assert!(table.get_ids_by_column("x", &Value::Integer(123)).unwrap().contains(&model.id));
        assert!(!table.get_ids_by_column("x", &Value::Integer(7654)).unwrap().contains(&model.id));
        assert!(table.get_ids_by_column("y", &Value::from("123")).unwrap().contains(&model.id));
        assert!(!table.get_ids_by_column("x", &Value::from("different value")).unwrap().contains(&model.id));
    }

    #[test]
    fn table_lookup_on_unknown_column_is_invalid() {
        let table = _create_table();

        let result = table.get_ids_by_column("non existing column", &Value::Integer(1));
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));

        let result = table.get_ids_ordered_by_column("id", Direction::Ascending);
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[test]
    fn table_lookup_of_absent_value_is_empty() {
        let table = _create_table();
        assert!(table.get_ids_by_column("x", &Value::Integer(1)).unwrap().is_empty());
    }

    #[test]
    fn table_id_and_excluded_columns_are_not_indexed() {
        let table: Table<Model> = Table::new("models", &["y"]).unwrap();

        assert!(table.index("x").is_ok());
        assert!(table.index("y").is_err());
        assert!(table.index("id").is_err());
        assert!(!table.schema().is_indexed("y"));
        assert_eq!(table.schema().len(), 2);
    }

    #[test]
    fn table_update_is_reflected_in_row_and_indices() {
        let mut table = _create_table();
        let model = Model::new(1, "");
        table.add_row(model.clone()).unwrap();

        table
            .update_row(&model.id, vec![("x", Value::Integer(2))])
            .unwrap();

        assert_eq!(table.get_by_id(&model.id).unwrap().x, 2);
        assert!(table.get_ids_by_column("x", &Value::Integer(1)).unwrap().is_empty());
        assert!(table.get_ids_by_column("x", &Value::Integer(2)).unwrap().contains(&model.id));
        assert_eq!(table.index("x").unwrap().distinct_values(), 1);
    }

    #[test]
    fn table_update_to_same_value_is_a_no_op() {
        let mut table = _create_table();
        let model = Model::new(5, "five");
        table.add_row(model.clone()).unwrap();

        table
            .update_row(&model.id, vec![("x", Value::Integer(5))])
            .unwrap();

        let bucket = table.get_ids_by_column("x", &Value::Integer(5)).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(table.index("x").unwrap().len(), 1);
    }

    #[test]
    fn table_update_of_id_column_is_invalid() {
        let mut table = _create_table();
        let model = Model::new(1, "");
        table.add_row(model.clone()).unwrap();

        let result = table.update_row(&model.id, vec![("id", Value::Key(Uuid::new_v4()))]);
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert_eq!(table.get_by_id(&model.id).unwrap(), &model);
    }

    #[test]
    fn table_update_of_missing_row_does_nothing() {
        let mut table = _create_table();
        let model = Model::new(1, "");
        table.add_row(model.clone()).unwrap();

        table
            .update_row(&Uuid::new_v4(), vec![("x", Value::Integer(9))])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get_ids_by_column("x", &Value::Integer(9)).unwrap().is_empty());
    }

    #[test]
    fn table_rejected_update_leaves_row_and_indices_untouched() {
        let mut table = _create_table();
        let model = Model::new(1, "before");
        table.add_row(model.clone()).unwrap();

        // `x` would be fine on its own; `y` gets a value of the wrong type.
        let result = table.update_row(
            &model.id,
            vec![("x", Value::Integer(2)), ("y", Value::Integer(3))],
        );

        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert_eq!(table.get_by_id(&model.id).unwrap(), &model);
        assert!(table.get_ids_by_column("x", &Value::Integer(1)).unwrap().contains(&model.id));
        assert!(table.get_ids_by_column("x", &Value::Integer(2)).unwrap().is_empty());
    }

    #[test]
    fn table_update_of_unknown_column_is_invalid() {
        let mut table = _create_table();
        let model = Model::new(1, "");
        table.add_row(model.clone()).unwrap();

        let result = table.update_row(&model.id, vec![("z", Value::Integer(2))]);
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[test]
    fn table_update_of_excluded_column_changes_row_only() {
        let mut table: Table<Model> = Table::new("models", &["y"]).unwrap();
        let model = Model::new(1, "old");
        table.add_row(model.clone()).unwrap();

        table
            .update_row(&model.id, vec![("y", Value::from("new"))])
            .unwrap();

        assert_eq!(table.get_by_id(&model.id).unwrap().y, "new");
        assert!(table.get_ids_by_column("y", &Value::from("new")).is_err());
    }

    #[test]
    fn table_deleted_rows_cannot_be_retrieved() {
        let mut table = _create_table();
        let model = Model::new(1, "");
        table.add_row(model.clone()).unwrap();

        let deleted = table.delete_row(&model.id);

        assert_eq!(deleted, Some(model.clone()));
        assert!(matches!(table.get_by_id(&model.id), Err(StoreError::NotFound(_))));
        assert!(!table.get_ids_by_column("x", &Value::Integer(1)).unwrap().contains(&model.id));
    }

    #[test]
    fn table_delete_of_missing_row_returns_none() {
        let mut table = _create_table();
        assert_eq!(table.delete_row(&Uuid::new_v4()), None);
    }

    #[test]
    fn table_other_rows_are_not_deleted() {
        let mut table = _create_table();
        let models = _fill(&mut table, &[1, 1]);

        table.delete_row(&models[0].id);

        assert!(table.get_by_id(&models[1].id).is_ok());
        let bucket = table.get_ids_by_column("x", &Value::Integer(1)).unwrap();
        assert_eq!(bucket.iter().collect::<Vec<_>>(), vec![&models[1].id]);
    }

    #[test]
    fn table_delete_after_update_removes_row_from_its_new_bucket() {
        let mut table = _create_table();
        let models = _fill(&mut table, &[1, 1]);

        table
            .update_row(&models[0].id, vec![("x", Value::Integer(2)), ("y", Value::from("moved"))])
            .unwrap();
        // A stale bucket would trip the consistency checks of `delete_row`.
        table.delete_row(&models[0].id);

        assert!(table.get_ids_by_column("x", &Value::Integer(2)).unwrap().is_empty());
        assert!(table.get_ids_by_column("y", &Value::from("moved")).unwrap().is_empty());
        assert_eq!(table.index("x").unwrap().len(), 1);
        assert_eq!(table.ids().len(), 1);
    }

    #[test]
    fn table_deleting_everything_leaves_no_buckets() {
        let mut table = _create_table();
        let models = _fill(&mut table, &[3, 1, 3, 2, 1, 7]);

        for model in models.iter() {
            table.delete_row(&model.id);
        }

        assert!(table.is_empty());
        assert!(table.ids().is_empty());
        for index in table.indices() {
            assert!(index.is_empty(), "index {} kept buckets", index.column());
            assert_eq!(index.distinct_values(), 0);
        }
    }

    #[test]
    fn table_ids_can_be_retrieved_in_order() {
        let mut table = _create_table();
        let mut models = _fill(&mut table, &[1, 6, 3, 4, 2, 5, 7]);
        models.sort_by_key(|model| model.x);

        let expected: Vec<RowId> = models.iter().map(|model| model.id).collect();
        let ordered: Vec<RowId> = table
            .get_ids_ordered_by_column("x", Direction::Ascending)
            .unwrap()
            .copied()
            .collect();

        assert_eq!(ordered, expected);
    }

    #[test]
    fn table_descending_order_is_the_reverse_for_distinct_values() {
        let mut table = _create_table();
        _fill(&mut table, &[4, 2, 9, 1]);

        let ascending: Vec<RowId> = table
            .get_ids_ordered_by_column("x", Direction::Ascending)
            .unwrap()
            .copied()
            .collect();
        let mut descending: Vec<RowId> = table
            .get_ids_ordered_by_column("x", Direction::Descending)
            .unwrap()
            .copied()
            .collect();
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn table_ordered_walk_keeps_insertion_order_within_a_value() {
        let mut table = _create_table();
        let models = _fill(&mut table, &[2, 1, 2, 1]);

        let ordered: Vec<RowId> = table
            .get_ids_ordered_by_column("x", Direction::Descending)
            .unwrap()
            .copied()
            .collect();

        assert_eq!(
            ordered,
            vec![models[0].id, models[2].id, models[1].id, models[3].id]
        );
    }

    #[test]
    fn table_ordered_walk_is_non_decreasing() {
        let mut table = _create_table();
        _fill(&mut table, &[5, -3, 5, 0, 12, -3, 8]);

        let values: Vec<i64> = table
            .get_ids_ordered_by_column("x", Direction::Ascending)
            .unwrap()
            .map(|id| table.get_by_id(id).unwrap().x)
            .collect();

        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(values.len(), 7);
    }
}

#[cfg(test)]
mod identity_set {
    use cobalt_engine::persistence::{IdentitySet, StoreError};

    #[test]
    fn identity_set_keeps_insertion_order() {
        let set: IdentitySet<u32> = vec![3, 1, 2, 1].into_iter().collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn identity_set_add_reports_existing_members() {
        let mut set = IdentitySet::new();

        assert!(set.add(1));
        assert!(!set.add(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn identity_set_remove_keeps_order_of_others() {
        let mut set: IdentitySet<u32> = vec![1, 2, 3, 4].into_iter().collect();

        set.remove(&2).unwrap();

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4]);
        assert!(!set.contains(&2));
    }

    #[test]
    fn identity_set_remove_of_absent_item_is_not_found() {
        let mut set: IdentitySet<u32> = IdentitySet::new();
        assert!(matches!(set.remove(&1), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn identity_set_intersection_follows_left_order() {
        let left: IdentitySet<u32> = vec![5, 4, 3, 2, 1].into_iter().collect();
        let right: IdentitySet<u32> = vec![1, 3, 5, 7].into_iter().collect();

        let both = left.intersection(&right);

        assert_eq!(both.iter().copied().collect::<Vec<_>>(), vec![5, 3, 1]);
        assert_eq!(left.len(), 5);
        assert_eq!(right.len(), 4);
    }

    #[test]
    fn identity_set_intersection_with_empty_is_empty() {
        let left: IdentitySet<u32> = vec![1, 2].into_iter().collect();
        assert!(left.intersection(&IdentitySet::new()).is_empty());
    }

    #[test]
    fn identity_set_extend_from_appends_new_members() {
        let mut set: IdentitySet<u32> = vec![1, 2].into_iter().collect();
        let other: IdentitySet<u32> = vec![2, 3].into_iter().collect();

        set.extend_from(&other);

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn identity_set_serializes_as_a_list() {
        let set: IdentitySet<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[2,1]");
    }
}

#[cfg(test)]
mod multiset {
    use cobalt_engine::persistence::{Direction, OrderedMultiset, StoreError};

    #[test]
    fn multiset_empty_has_no_keys() {
        let multiset: OrderedMultiset<i64, u32> = OrderedMultiset::new();

        assert!(multiset.is_empty());
        assert_eq!(multiset.keys(Direction::Ascending).count(), 0);
    }

    #[test]
    fn multiset_keys_come_out_sorted() {
        let mut multiset = OrderedMultiset::new();
        multiset.add(2, 10u32);
        multiset.add(1, 11);
        multiset.add(4, 12);
        multiset.add(3, 13);

        let ascending: Vec<i64> = multiset.keys(Direction::Ascending).copied().collect();
        let descending: Vec<i64> = multiset.keys(Direction::Descending).copied().collect();

        assert_eq!(ascending, vec![1, 2, 3, 4]);
        assert_eq!(descending, vec![4, 3, 2, 1]);
    }

    #[test]
    fn multiset_duplicate_keys_share_one_entry() {
        let mut multiset = OrderedMultiset::new();
        multiset.add(1, 10u32);
        multiset.add(1, 11);
        multiset.add(2, 12);
        multiset.add(2, 12);

        assert_eq!(multiset.n_keys(), 2);
        assert_eq!(multiset.len(), 3);
        assert_eq!(
            multiset.get(&1).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![10, 11]
        );
    }

    #[test]
    fn multiset_drops_key_with_its_last_item() {
        let mut multiset = OrderedMultiset::new();
        multiset.add(1, 10u32);
        multiset.add(2, 11);
        multiset.add(2, 12);
        multiset.add(3, 13);

        multiset.remove(&2, &11).unwrap();
        assert!(multiset.contains_key(&2));

        multiset.remove(&2, &12).unwrap();
        assert!(!multiset.contains_key(&2));
        assert_eq!(
            multiset.keys(Direction::Ascending).copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn multiset_remove_of_absent_pair_is_not_found() {
        let mut multiset = OrderedMultiset::new();
        multiset.add(1, 10u32);

        assert!(matches!(multiset.remove(&2, &10), Err(StoreError::NotFound(_))));
        assert!(matches!(multiset.remove(&1, &11), Err(StoreError::NotFound(_))));
        assert_eq!(multiset.len(), 1);
    }
}
