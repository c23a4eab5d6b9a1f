//! Round-trip properties of the writer and reader

use fixture_zip::{Archive, ArchiveBuilder, CompressionMethod, EntryOptions};
use proptest::prelude::*;
use std::io::Cursor;

fn method_strategy() -> impl Strategy<Value = CompressionMethod> {
    prop_oneof![
        Just(CompressionMethod::Stored),
        Just(CompressionMethod::Deflated),
        Just(CompressionMethod::Bzip2),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn entries_read_back_unchanged(
        payloads in prop::collection::vec(
            (method_strategy(), prop::collection::vec(any::<u8>(), 0..2048)),
            0..8,
        )
    ) {
        let mut builder = ArchiveBuilder::new(Vec::new());
        for (index, (method, data)) in payloads.iter().enumerate() {
            builder
                .add_entry_data(&format!("entry-{index}.bin"), data, &EntryOptions::new(*method))
                .unwrap();
        }
        let bytes = builder.finish().unwrap();

        let mut archive = Archive::from_reader(Cursor::new(bytes)).unwrap();
        prop_assert_eq!(archive.len(), payloads.len());

        for (index, (method, data)) in payloads.iter().enumerate() {
            let entry = &archive.entries()[index];
            prop_assert_eq!(&entry.name, &format!("entry-{index}.bin"));
            prop_assert_eq!(entry.compression().unwrap(), *method);
            prop_assert_eq!(&archive.read_entry_at(index).unwrap(), data);
        }
    }
}
