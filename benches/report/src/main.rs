use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

fn get_median(test_type: &str, tree_type: &str, policy: &str) -> f64 {
    let file = File::open(Path::new(&format!("../../target/criterion/{}_{}_{}/base/estimates.json", test_type, tree_type, policy))).unwrap();
    let reader = BufReader::new(file);
    let val : serde_json::Value = serde_json::de::from_reader(reader).unwrap();

    val["median"]["point_estimate"].as_f64().unwrap()
}

// One box per test type, height is the shared median relative to the unique one
fn plot_tree_type(tree_type: &str, test_types: &[&str], start_pos: f64, mut writer: impl Write) {
    for (i,test_type) in test_types.iter().enumerate() {
        let unique_median = get_median(test_type, tree_type, "unique");
        let shared_median = get_median(test_type, tree_type, "shared");

        writeln!(writer, "{}\t{}\t{}\t0x{:02X}{:02X}{:02X}", start_pos+(i as f64)*0.2, test_type, shared_median/unique_median, 41-i*4, 103-i*10, 204-i*20).unwrap();
    }
}

fn plot_policies(test_types: &[&str], ymax:f64) {
    let tree_types = ["flat", "binary", "wide_random", "deep_random"];

    let file = File::create(Path::new("./graphs/policies.txt")).unwrap();
    let mut writer = BufWriter::new(file);

    for (i,tree_type) in tree_types.iter().enumerate() {
        plot_tree_type(tree_type, test_types, 1. + (i as f64)*3., &mut writer);
    }
    writer.flush().unwrap();

    {
        let gp_text = format!("
set term png noenhanced
set output \"./graphs/policies.png\"
set boxwidth 0.1
set yrange [0 : {ymax}]
set style fill solid 0.5

set arrow from -0.5,1 to 12,1 nohead

plot \"./graphs/policies.txt\" using 1:3:4 with boxes lc rgb var notitle, \"\"  using ($1):($3+0.2):(sprintf(\"%3.2f\",$3)) with labels font \"Arial,8\" rotate by 90 notitle

set output
", ymax=ymax);

        let file = File::create(Path::new("./graphs/policies.gp")).unwrap();
        let mut writer = BufWriter::new(file);
        write!(writer, "{}", gp_text).unwrap();
        writer.flush().unwrap();
    }

    std::process::Command::new("gnuplot")
        .args(&["./graphs/policies.gp"])
        .output()
        .expect("failed to execute gnuplot");
}

fn main() {
    std::fs::create_dir_all("./graphs").unwrap();

    let test_types = ["make", "bfs", "dfs", "inorder", "teardown"];

    plot_policies(&test_types, 3.);
}
