use styling_ai_common::{build_styling_prompt, recommend_from_response, Catalog, ColorCategory, UserProfile};
use styling_ai_rust::generator::GeminiClient;

const CATALOG: &str = "\
商品名,ブランド名,価格,特徴,推奨パーソナルカラー,商品カテゴリ
ツヤ肌ファンデ,ブランドA,3200,ツヤ肌,イエベ春;ブルベ夏,ベースメイク
コーラルシャドウ,ブランドB,1800,コーラル系,イエベ春,アイシャドウ
コーラルリップ,ブランドC,1500,発色◎,イエベ春,リップメイク
ピーチチーク,ブランドD,1200,血色感,全タイプ,チーク
";

#[tokio::test]
async fn gemini_recommend_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let catalog = Catalog::from_csv_str(CATALOG).expect("catalog parse failed");
    let profile = UserProfile {
        personal_color: Some(ColorCategory::SpringWarm),
        ..UserProfile::default()
    };
    let prompt = build_styling_prompt(&profile, &catalog);

    let client = GeminiClient::new(api_key, "gemini-1.5-flash", 0.2);
    let response = client.generate(&prompt).await.expect("gemini api failed");
    assert!(!response.trim().is_empty());

    // カタログ外の商品が混ざっても、照合後は必ずカタログ内の商品だけになる
    let recommendation = recommend_from_response(&response, &catalog);
    for (_, products) in recommendation.products.iter() {
        for p in products {
            assert!(catalog.find(&p.product.name, &p.product.brand).is_some());
        }
    }
}
