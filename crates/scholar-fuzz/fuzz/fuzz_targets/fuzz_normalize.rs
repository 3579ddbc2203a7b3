#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_archive::models::RawPayload;
use scholar_archive::normalize::{canonicalize_article, normalize};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let profile = normalize(RawPayload::new(json));
    for article in &profile.articles {
        assert!(article.get("cited_by").is_none() || !article["cited_by"].is_object());
        assert_eq!(canonicalize_article(article.clone()), *article);
    }
    let _ = profile.author_info();
});
