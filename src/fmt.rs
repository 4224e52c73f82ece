/// Format a rupee amount with Indian digit grouping: ₹1,23,456.78
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    // Last three digits, then groups of two.
    let grouped = if int_part.len() > 3 {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut out = String::new();
        for (i, c) in head.chars().rev().enumerate() {
            if i > 0 && i % 2 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        let head: String = out.chars().rev().collect();
        format!("{head},{tail}")
    } else {
        int_part.to_string()
    };

    if negative {
        format!("-₹{grouped}.{dec_part}")
    } else {
        format!("₹{grouped}.{dec_part}")
    }
}
