#![no_main]

use decode_errors::identity::sentinel;
use decode_errors::{ClassifiedError, Code, Decoder, MessageCatalog, Rule};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    let mut mid = text.len() / 2;
    while !text.is_char_boundary(mid) {
        mid -= 1;
    }
    let (key, rest) = text.split_at(mid);

    let known = sentinel(rest.to_string());
    let catalog = MessageCatalog::new().with_entry(key.to_string(), rest.to_string());
    let decoder = Decoder::builder(vec![
        Rule::new(Code::new(1001), key.to_string()).with_error(Arc::clone(&known)),
        Rule::new(Code::new(1000), "error.catchall")
            .matching(|err| err.to_string().len() % 2 == 0),
    ])
    .message_translator(catalog)
    .build();

    for err in [known, sentinel(text.clone())] {
        let out = decoder.translate(Arc::clone(&err));

        match out.downcast_ref::<ClassifiedError>() {
            Some(classified) => {
                assert!(Arc::ptr_eq(classified.wrapped(), &err));
                let mut line = String::new();
                let _ = classified.internal_log().write_to(&mut line);
            }
            None => assert!(Arc::ptr_eq(&out, &err)),
        }
    }
});
