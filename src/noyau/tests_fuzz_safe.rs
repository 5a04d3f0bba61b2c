//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panic, quelle que soit l'entrée
//!   * Ok(v) => v est fini (jamais NaN/±∞)
//!   * jamais d'ErreurCalc::Interne (les fautes du fuzz sont des fautes d'appelant)
//!   * même seed => mêmes sorties (pureté)

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalc;
use super::{eval_expression, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Invariants valables pour TOUTE entrée, bien formée ou non.
fn check_invariants(expr: &str, res: &Result<f64, ErreurCalc>) {
    match res {
        Ok(v) => assert!(v.is_finite(), "résultat non fini pour expr={expr:?}: {v}"),
        Err(ErreurCalc::Interne(msg)) => {
            panic!("erreur interne atteinte par le fuzz: expr={expr:?} msg={msg}")
        }
        Err(_) => {}
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(12);
    if rng.coin() {
        format!("{entier}")
    } else {
        let frac = rng.pick(100);
        format!("{entier}.{frac:02}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        3 => "e".to_string(),
        4 => "sqrt(2)".to_string(),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        // exposant borné : les dépassements sont des erreurs attendues, pas des gels
        7 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        8 => {
            let f = match rng.pick(7) {
                0 => "sin",
                1 => "cos",
                2 => "tan",
                3 => "sqrt",
                4 => "log",
                5 => "ln",
                _ => "abs",
            };
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        9 => format!("|{}|", gen_expr(rng, depth - 1)),
        // factorielle bornée (170! est le plafond, au-delà : erreur attendue)
        10 => format!("({})!", rng.pick(12)),
        _ => format!("({})²", gen_expr(rng, depth - 1)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_generees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);
        let mode = if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        };

        let res = eval_expression(&expr, mode);
        check_invariants(&expr, &res);

        match res {
            Ok(_) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop \"sage\"");
}

#[test]
fn fuzz_safe_determinisme() {
    // Même seed => mêmes expressions => mêmes sorties, au bit près.
    let passe = |seed: u64| -> Vec<Result<u64, ErreurCalc>> {
        let mut rng = Rng::new(seed);
        (0..120)
            .map(|_| {
                let expr = gen_expr(&mut rng, 4);
                eval_expression(&expr, ModeAngle::Degres).map(f64::to_bits)
            })
            .collect()
    };

    assert_eq!(passe(0xBADC0DE), passe(0xBADC0DE));
}

#[test]
fn fuzz_safe_entrees_poubelle() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Soupe de caractères vus par le lexeur (opérateurs unicode compris).
    const POOL: &[char] = &[
        '0', '1', '9', '.', '+', '-', '*', '/', '%', '^', '(', ')', '|', '!', '²', '³', '×',
        '÷', 'π', '√', 'e', 's', 'i', 'n', 'x', '_', ' ', '#', 'é',
    ];

    let mut rng = Rng::new(0xDEAD_BEEF_u64);

    for _ in 0..400 {
        budget(t0, max);

        let longueur = 1 + rng.pick(24) as usize;
        let expr: String = (0..longueur)
            .map(|_| POOL[rng.pick(POOL.len() as u32) as usize])
            .collect();

        // jamais de panic, jamais d'Interne, jamais de non-fini
        let res = eval_expression(&expr, ModeAngle::Degres);
        check_invariants(&expr, &res);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr, ModeAngle::Degres).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(0.5) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_garde_fou_longueur() {
    // au-delà de la borne de jetons : rejet propre, pas de gel
    let mut expr = String::from("1");
    for _ in 0..4000 {
        expr.push_str("+1");
    }
    // 8001 jetons > MAX : erreur de syntaxe descriptive
    match eval_expression(&expr, ModeAngle::Degres) {
        Err(ErreurCalc::Syntaxe(msg)) => assert!(msg.contains("trop longue"), "msg={msg}"),
        autre => panic!("attendu Syntaxe(trop longue), obtenu {autre:?}"),
    }
}
