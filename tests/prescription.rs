#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lenslog::db::kv::SqliteStore;
    use lenslog::libs::prescription::{EyeSide, EyeTarget, Prescription, PrescriptionError, PrescriptionField};
    use lenslog::libs::store::{MemoryStore, PersistenceAdapter};
    use std::fs;

    fn brands() -> Vec<String> {
        vec!["Acuvue Oasys".to_string(), "Dailies Total1".to_string()]
    }

    #[test]
    fn test_value_tables() {
        let sph = PrescriptionField::Sph.allowed_values().unwrap();
        assert_eq!(sph.first().map(String::as_str), Some("-10.00"));
        assert_eq!(sph.last().map(String::as_str), Some("+8.00"));
        assert_eq!(sph.len(), 73);
        assert!(sph.contains(&"+0.00".to_string()));

        let add = PrescriptionField::Add.allowed_values().unwrap();
        assert_eq!(add.first().map(String::as_str), Some("+0.75"));
        assert_eq!(add.last().map(String::as_str), Some("+3.00"));

        let bc = PrescriptionField::Bc.allowed_values().unwrap();
        assert_eq!(bc.len(), 21);
        assert!(bc.contains(&"8.6".to_string()));

        assert_eq!(PrescriptionField::Axis.allowed_values().unwrap().len(), 181);
        assert!(PrescriptionField::Brand.allowed_values().is_none());
    }

    #[test]
    fn test_values_are_stored_in_canonical_form() {
        let mut prescription = Prescription::default();

        prescription.set_field(EyeTarget::Both, PrescriptionField::Sph, Some("-1.5"), &[]).unwrap();
        prescription.set_field(EyeTarget::Right, PrescriptionField::Bc, Some("8.60"), &[]).unwrap();
        prescription.set_field(EyeTarget::Left, PrescriptionField::Cyl, Some("0"), &[]).unwrap();

        assert_eq!(prescription.left.sph.as_deref(), Some("-1.50"));
        assert_eq!(prescription.right.sph.as_deref(), Some("-1.50"));
        assert_eq!(prescription.right.bc.as_deref(), Some("8.6"));
        assert_eq!(prescription.left.bc, None);
        assert_eq!(prescription.left.cyl.as_deref(), Some("+0.00"));
    }

    #[test]
    fn test_values_outside_tables_are_rejected() {
        let mut prescription = Prescription::default();

        for (field, value) in [
            (PrescriptionField::Sph, "-1.30"),
            (PrescriptionField::Sph, "+9.00"),
            (PrescriptionField::Axis, "181"),
            (PrescriptionField::Add, "0.50"),
            (PrescriptionField::Dia, "12.9"),
            (PrescriptionField::Bc, "abc"),
        ] {
            let result = prescription.set_field(EyeTarget::Both, field, Some(value), &[]);
            assert!(matches!(result, Err(PrescriptionError::InvalidValue { .. })), "{field} {value}");
        }
        assert_eq!(prescription, Prescription::default());
    }

    #[test]
    fn test_brand_must_be_in_catalog() {
        let mut prescription = Prescription::default();

        prescription.set_field(EyeTarget::Both, PrescriptionField::Brand, Some("acuvue oasys"), &brands()).unwrap();
        assert_eq!(prescription.left.brand.as_deref(), Some("Acuvue Oasys"));

        let result = prescription.set_field(EyeTarget::Both, PrescriptionField::Brand, Some("Unknown"), &brands());
        assert!(matches!(result, Err(PrescriptionError::UnknownBrand(_))));

        prescription.set_field(EyeTarget::Left, PrescriptionField::Brand, Some("Anything"), &[]).unwrap();
        assert_eq!(prescription.left.brand.as_deref(), Some("Anything"));
    }

    #[test]
    fn test_same_for_both_eyes_reads_left() {
        let mut prescription = Prescription::default();
        prescription.set_field(EyeTarget::Left, PrescriptionField::Sph, Some("-2.00"), &[]).unwrap();
        prescription.set_field(EyeTarget::Right, PrescriptionField::Sph, Some("-3.00"), &[]).unwrap();

        assert_eq!(prescription.eye(EyeSide::Right).sph.as_deref(), Some("-3.00"));

        prescription.same_for_both_eyes = true;
        assert_eq!(prescription.eye(EyeSide::Right).sph.as_deref(), Some("-2.00"));
    }

    #[test]
    fn test_parsing_targets_and_fields() {
        assert_eq!("OD".parse::<EyeTarget>().unwrap(), EyeTarget::Right);
        assert_eq!("both".parse::<EyeTarget>().unwrap(), EyeTarget::Both);
        assert!("middle".parse::<EyeTarget>().is_err());
        assert_eq!("AXIS".parse::<PrescriptionField>().unwrap(), PrescriptionField::Axis);
        assert!(matches!("power".parse::<PrescriptionField>(), Err(PrescriptionError::UnknownField(_))));
    }

    #[test]
    fn test_expiration() {
        let prescription = Prescription {
            expiration: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..Prescription::default()
        };

        assert!(!prescription.is_expired(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(prescription.is_expired(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
        assert_eq!(prescription.days_until_expiration(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()), Some(10));
        assert!(!Prescription::default().is_expired(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
    }

    #[test]
    fn test_save_and_load_with_cleared_fields() {
        let mut store = MemoryStore::new();
        let mut prescription = Prescription::default();
        prescription.set_field(EyeTarget::Both, PrescriptionField::Sph, Some("-4.25"), &[]).unwrap();
        prescription.set_field(EyeTarget::Right, PrescriptionField::Axis, Some("90"), &[]).unwrap();
        prescription.expiration = NaiveDate::from_ymd_opt(2026, 1, 31);
        prescription.save(&mut store).unwrap();

        prescription.set_field(EyeTarget::Right, PrescriptionField::Axis, None, &[]).unwrap();
        prescription.save(&mut store).unwrap();

        let loaded = Prescription::load(&store);
        assert_eq!(loaded, prescription);
        assert_eq!(store.get("prescription.right.axis").unwrap(), None);
        assert_eq!(store.get("prescription.expiration").unwrap().as_deref(), Some("\"2026-01-31\""));
    }

    #[test]
    fn test_image_reference() {
        let temp_dir = tempfile::tempdir().unwrap();
        let image = temp_dir.path().join("rx.jpg");
        fs::write(&image, b"jpeg").unwrap();
        let image = image.to_string_lossy().to_string();
        let mut store = SqliteStore::in_memory().unwrap();
        let mut prescription = Prescription::default();

        let missing = prescription.attach_image("/definitely/not/here.jpg");
        assert!(matches!(missing, Err(PrescriptionError::ImageNotFound(_))));

        prescription.attach_image(&image).unwrap();
        prescription.save(&mut store).unwrap();
        assert_eq!(Prescription::load(&store).image_path.as_deref(), Some(image.as_str()));

        prescription.detach_image();
        prescription.save(&mut store).unwrap();
        assert_eq!(Prescription::load(&store).image_path, None);
    }
}
