use vellum_dice::{AttackRequest, RollRequest, perform_roll};

pub fn run(
    formula: &str,
    bonus: i32,
    advantage: i32,
    seed: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let mut rng = super::make_rng(seed);
    let request = RollRequest::Attack(AttackRequest {
        damage: formula.to_string(),
        attack_bonus: bonus,
        advantage,
    });

    let result = perform_roll(&request, &mut rng).map_err(|e| e.to_string())?;
    if json {
        super::print_json(&result)
    } else {
        super::print_result("Attack", &result);
        Ok(())
    }
}
