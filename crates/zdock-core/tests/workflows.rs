use nalgebra::Point3;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use zdockpp::core::io::pdb::PdbFile;
use zdockpp::core::io::traits::FileFormat;
use zdockpp::core::io::zdock::ZdockFile;
use zdockpp::engine::config::{ClusterOutput, PruningConfigBuilder};
use zdockpp::engine::error::EngineError;
use zdockpp::engine::progress::ProgressReporter;
use zdockpp::workflows::centroids::{self, CentroidOptions};
use zdockpp::workflows::error::WorkflowError;
use zdockpp::workflows::filter::{self, FilterOptions};
use zdockpp::workflows::ligand::{self, LigandOptions};
use zdockpp::workflows::multimer::{self, MultimerOptions};
use zdockpp::workflows::prune;
use zdockpp::workflows::split::{run_split, run_unsplit};

const TOLERANCE: f64 = 1e-6;

// Unrotated structures on a 100-cell grid with unit spacing: each record moves
// the ligand by the negated, wrapped grid offset, i.e. x = 0, 1, 10, 0.
const PAIRWISE: &str = "100\t1.0\n\
    0.000000\t0.000000\t0.000000\n\
    rec.pdb\t0.000\t0.000\t0.000\n\
    lig.pdb\t0.000\t0.000\t0.000\n\
    0.000000\t0.000000\t0.000000\t0\t0\t0\t5.000\n\
    0.000000\t0.000000\t0.000000\t99\t0\t0\t4.000\n\
    0.000000\t0.000000\t0.000000\t90\t0\t0\t3.000\n\
    0.000000\t0.000000\t0.000000\t0\t0\t0\t2.000\n";

const MULTIMER: &str = "100\t1.0\t3\n\
    0.000000\t0.000000\t0.000000\n\
    mono.pdb\t0.000\t0.000\t0.000\n\
    0.000000\t0.000000\t0\t0\t7.50\n";

fn atom_line(serial: u32, name: &str, residue: &str, chain: char, seq: i32, [x, y, z]: [f64; 3]) -> String {
    format!("ATOM  {serial:>5} {name:<4} {residue:>3} {chain}{seq:>4}    {x:8.3}{y:8.3}{z:8.3}  1.00  0.00\n")
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn pairwise() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("run.out"), PAIRWISE).unwrap();
        fs::write(
            dir.path().join("rec.pdb"),
            atom_line(1, "CA", "ALA", 'A', 1, [10.0, 0.0, 0.0]) + "END\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("lig.pdb"),
            atom_line(1, "N", "GLY", 'B', 1, [0.0, 0.0, 0.0])
                + &atom_line(2, "CA", "GLY", 'B', 1, [1.5, 0.0, 0.0])
                + "END\n",
        )
        .unwrap();
        Self { dir }
    }

    fn multimer() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("run.out"), MULTIMER).unwrap();
        fs::write(
            dir.path().join("mono.pdb"),
            atom_line(5, "CA", "ALA", 'X', 1, [1.0, 0.0, 0.0])
                + &atom_line(6, "CB", "ALA", 'X', 1, [2.0, 0.0, 0.0]),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn result(&self) -> PathBuf {
        self.path("run.out")
    }
}

fn read_atoms(bytes: Vec<u8>) -> Vec<(u32, char, Point3<f64>)> {
    let structure = PdbFile::read_from(&mut Cursor::new(bytes)).unwrap();
    structure
        .atoms()
        .map(|a| (a.serial, a.chain_id, a.position))
        .collect()
}

fn scores(path: &Path) -> Vec<f64> {
    ZdockFile::read_from_path(path)
        .unwrap()
        .records()
        .iter()
        .map(|r| r.score)
        .collect()
}

#[test]
fn prune_keeps_cluster_representatives() {
    let fixture = Fixture::pairwise();
    let config = PruningConfigBuilder::new().cutoff(2.0).build().unwrap();
    let result = prune::run(&fixture.result(), None, &config, &ProgressReporter::new()).unwrap();

    let kept: Vec<f64> = result.document.records().iter().map(|r| r.score).collect();
    assert_eq!(kept, vec![5.0, 3.0]);
    assert_eq!(result.summaries.len(), 2);
    assert_eq!(result.summaries[0].population, 3);
    assert_eq!(result.summaries[1].representative, 3);
}

#[test]
fn prune_can_annotate_and_report() {
    let fixture = Fixture::pairwise();
    let config = PruningConfigBuilder::new()
        .cutoff(0.5)
        .output(ClusterOutput::Annotated)
        .build()
        .unwrap();
    let result = prune::run(&fixture.result(), None, &config, &ProgressReporter::new()).unwrap();

    let ids: Vec<f64> = result.document.records().iter().map(|r| r.score).collect();
    assert_eq!(ids, vec![1.0, 2.0, 3.0, 1.0]);

    let report = fixture.path("clusters.csv");
    prune::write_cluster_report(&result.summaries, &report).unwrap();
    let text = fs::read_to_string(&report).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("cluster,representative,score,population"));
    assert_eq!(lines.next(), Some("1,1,5.0,2"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn prune_reports_missing_structure_path() {
    let fixture = Fixture::pairwise();
    fs::remove_file(fixture.path("lig.pdb")).unwrap();
    let config = PruningConfigBuilder::new().cutoff(2.0).build().unwrap();
    let err = prune::run(&fixture.result(), None, &config, &ProgressReporter::new()).unwrap_err();
    match err {
        WorkflowError::Resolve { path, .. } => assert!(path.ends_with("lig.pdb")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ligand_is_moved_into_prediction_pose() {
    let fixture = Fixture::pairwise();
    let options = LigandOptions {
        prediction: 3,
        ..Default::default()
    };
    let mut out = Vec::new();
    ligand::run(&fixture.result(), &options, &mut out).unwrap();

    let atoms = read_atoms(out);
    assert_eq!(atoms.len(), 2);
    assert!((atoms[0].2 - Point3::new(10.0, 0.0, 0.0)).norm() < TOLERANCE);
    assert!((atoms[1].2 - Point3::new(11.5, 0.0, 0.0)).norm() < TOLERANCE);
}

#[test]
fn complex_output_appends_receptor() {
    let fixture = Fixture::pairwise();
    let options = LigandOptions {
        complex: true,
        all_records: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    ligand::run(&fixture.result(), &options, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|l| *l == "END").count(), 2);
    let atoms = read_atoms(text.into_bytes());
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms[2].1, 'A');
}

#[test]
fn ligand_rejects_prediction_out_of_range() {
    let fixture = Fixture::pairwise();
    for prediction in [0, 5] {
        let options = LigandOptions {
            prediction,
            ..Default::default()
        };
        let err = ligand::run(&fixture.result(), &options, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Engine(EngineError::PredictionOutOfRange { available: 4, .. })
        ));
        assert!(err.to_string().contains("valid range 1 - 4"));
    }
}

#[test]
fn multimer_ring_is_renumbered_and_relabelled() {
    let fixture = Fixture::multimer();
    let mut out = Vec::new();
    multimer::run(&fixture.result(), &MultimerOptions::default(), &mut out).unwrap();

    let atoms = read_atoms(out);
    let serials: Vec<u32> = atoms.iter().map(|a| a.0).collect();
    let chains: Vec<char> = atoms.iter().map(|a| a.1).collect();
    assert_eq!(serials, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(chains, vec!['A', 'A', 'B', 'B', 'C', 'C']);
    // Every component keeps the subunit's distance from the ring axis.
    for (_, _, p) in &atoms {
        let radius = p.coords.xy().norm();
        assert!((radius - 1.0).abs() < TOLERANCE || (radius - 2.0).abs() < TOLERANCE);
    }
}

#[test]
fn single_multimer_component_keeps_serials() {
    let fixture = Fixture::multimer();
    let options = MultimerOptions {
        component: Some(2),
        ..Default::default()
    };
    let mut out = Vec::new();
    multimer::run(&fixture.result(), &options, &mut out).unwrap();

    let atoms = read_atoms(out);
    assert_eq!(atoms.iter().map(|a| a.0).collect::<Vec<_>>(), vec![5, 6]);
    assert!(atoms.iter().all(|a| a.1 == 'C'));

    let options = MultimerOptions {
        component: Some(3),
        ..Default::default()
    };
    let err = multimer::run(&fixture.result(), &options, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("valid range 0 - 2"));
}

#[test]
fn split_and_unsplit_restore_the_document() {
    let fixture = Fixture::pairwise();
    let prefix = fixture.path("part.");
    let written = run_split(&fixture.result(), Some(3), prefix.to_str().unwrap()).unwrap();

    assert_eq!(written, vec![fixture.path("part.aaaa"), fixture.path("part.aaab")]);
    assert_eq!(scores(&written[0]), vec![5.0, 4.0, 3.0]);
    assert_eq!(scores(&written[1]), vec![2.0]);

    let merged = run_unsplit(&written).unwrap();
    let mut out = Vec::new();
    ZdockFile::write_to(&merged, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), PAIRWISE);
}

#[test]
fn split_defaults_to_a_single_chunk() {
    let fixture = Fixture::pairwise();
    let prefix = fixture.path("zdsplit.");
    let written = run_split(&fixture.result(), None, prefix.to_str().unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), PAIRWISE);
}

#[test]
fn unsplit_rejects_mixed_dialects() {
    let pairwise = Fixture::pairwise();
    let multimer = Fixture::multimer();
    let err = run_unsplit(&[pairwise.result(), multimer.result()]).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Engine(EngineError::DialectMismatch { .. })
    ));
}

#[test]
fn filter_keeps_predictions_satisfying_constraints() {
    let fixture = Fixture::pairwise();
    let constraints = fixture.path("constraints.txt");
    fs::write(
        &constraints,
        "# receptor atom, ligand atom, distance\n1 CA ALA A 1 1 N GLY B 1 3.0 MAX\n",
    )
    .unwrap();

    let filtered = filter::run(
        &fixture.result(),
        &constraints,
        &FilterOptions::default(),
        &ProgressReporter::new(),
    )
    .unwrap();
    let kept: Vec<f64> = filtered.records().iter().map(|r| r.score).collect();
    assert_eq!(kept, vec![3.0]);
}

#[test]
fn filter_reports_malformed_constraint_file() {
    let fixture = Fixture::pairwise();
    let constraints = fixture.path("constraints.txt");
    fs::write(&constraints, "1 CA ALA A\n").unwrap();
    let err = filter::run(
        &fixture.result(),
        &constraints,
        &FilterOptions::default(),
        &ProgressReporter::new(),
    )
    .unwrap_err();
    assert!(matches!(err, WorkflowError::ConstraintFile { .. }));
}

#[test]
fn centroids_follow_the_top_predictions() {
    let fixture = Fixture::pairwise();
    let options = CentroidOptions {
        count: 10,
        ..Default::default()
    };
    let atoms = centroids::run(&fixture.result(), &options).unwrap();
    assert_eq!(atoms.len(), 4);
    assert!((atoms[1].position - Point3::new(1.75, 0.0, 0.0)).norm() < TOLERANCE);
    assert!(atoms.iter().all(|a| a.chain_id == 'Z'));

    let mut out = Vec::new();
    centroids::write_centroids(&atoms, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().all(|l| l.starts_with("HETATM") && l.contains("HOH")));
}
