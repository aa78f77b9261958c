use vellum_dice::{PoolRequest, RollRequest, perform_roll};

pub fn run(formula: &str, seed: Option<u64>, times: u32, json: bool) -> Result<(), String> {
    let mut rng = super::make_rng(seed);
    let request = RollRequest::Pool(PoolRequest {
        formula: formula.to_string(),
    });

    for _ in 0..times {
        let result = perform_roll(&request, &mut rng).map_err(|e| e.to_string())?;
        if json {
            super::print_json(&result)?;
        } else {
            super::print_result("Roll", &result);
        }
    }

    Ok(())
}
