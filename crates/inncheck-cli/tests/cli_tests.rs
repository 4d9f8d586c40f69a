//! End-to-end tests for the `inncheck` binary

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use inncheck_test_utils::{write_split_png, INVALID_CPF, VALID_CPF};
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn report_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }

    /// Config with no countdown, small images and reports inside the temp dir
    fn write_config(&self) {
        std::fs::create_dir_all(self.data_dir()).unwrap();
        let body = format!(
            "countdown_secs = 0\noutput_size = 8\nreport_dir = {:?}\n",
            self.report_dir().display().to_string()
        );
        std::fs::write(self.data_dir().join("inncheck.toml"), body).unwrap();
    }

    fn photos(&self) -> (PathBuf, PathBuf) {
        let doc = self.dir.path().join("doc.png");
        let face = self.dir.path().join("face.png");
        write_split_png(&doc, 16, 12);
        write_split_png(&face, 12, 16);
        (doc, face)
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("inncheck");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.data_dir());
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let out = self.cmd().arg("--json").args(args).output().unwrap();
        assert!(
            out.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        let doc: Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(doc["ok"], true);
        doc["data"].clone()
    }

    fn check_in(&self, unit: &str, cpf: &str) -> assert_cmd::assert::Assert {
        let (doc, face) = self.photos();
        self.cmd()
            .args(["check-in", unit, "--name", "Maria Souza", "--cpf", cpf])
            .arg("--document-photo")
            .arg(doc)
            .arg("--face-photo")
            .arg(face)
            .assert()
    }
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap()
}

#[test]
fn test_validate_cpf_accepts_formatted_input() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["validate-cpf", "529.982.247-25"])
        .assert()
        .success()
        .stdout(contains("529.982.247-25 válido"));
}

#[test]
fn test_validate_cpf_reports_errors() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["validate-cpf", INVALID_CPF])
        .assert()
        .failure()
        .stderr(contains("CPF inválido"));
    ws.cmd()
        .args(["validate-cpf", "529.982"])
        .assert()
        .failure()
        .stderr(contains("CPF incompleto"));
    ws.cmd()
        .args(["validate-cpf", "111.111.111-11"])
        .assert()
        .failure()
        .stderr(contains("CPF inválido"));
}

#[test]
fn test_validate_cpf_json() {
    let ws = Workspace::new();
    let data = ws.json(&["validate-cpf", VALID_CPF]);
    assert_eq!(data["digits"], VALID_CPF);
    assert_eq!(data["formatted"], "529.982.247-25");
    assert_eq!(data["feedback"], "Valid");
}

#[test]
fn test_units_and_tasks_flow() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["units", "add", "101", "--type", "Chalé"])
        .assert()
        .success()
        .stdout(contains("created unit 101"));
    ws.cmd()
        .args(["tasks", "add", "101", "Piscina limpa", "--category", "piscina"])
        .assert()
        .success();
    ws.cmd()
        .args(["tasks", "add", "101", "Churrasqueira"])
        .assert()
        .success();
    ws.cmd()
        .args(["tasks", "toggle", "101", "1"])
        .assert()
        .success()
        .stdout(contains("Piscina limpa -> OK"));

    let unit = ws.json(&["units", "show", "101"]);
    assert_eq!(unit["type"], "Chalé");
    assert_eq!(unit["status"], "AVAILABLE");
    let tasks = unit["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["status"], "OK");
    assert_eq!(tasks[0]["category"], "PISCINA");
    assert_eq!(tasks[1]["status"], "PENDENTE");
    assert_eq!(tasks[1]["category"], "INSPECTION");

    ws.cmd()
        .args(["units", "list"])
        .assert()
        .success()
        .stdout(contains("101\tChalé\tDisponível\t50%"));

    ws.cmd()
        .args(["tasks", "delete-category", "101", "PISCINA"])
        .assert()
        .success()
        .stdout(contains("deleted 1 tasks from Piscina"));
    ws.cmd()
        .args(["tasks", "edit", "101", "1", " "])
        .assert()
        .failure();
}

#[test]
fn test_duplicate_and_unknown_units() {
    let ws = Workspace::new();
    ws.cmd().args(["units", "add", "7"]).assert().success();
    ws.cmd()
        .args(["units", "add", "7"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    ws.cmd().args(["units", "show", "8"]).assert().failure();
    ws.cmd().args(["units", "remove", "7"]).assert().success();
    let units = ws.json(&["units", "list"]);
    assert_eq!(units.as_array().unwrap().len(), 0);
}

#[test]
fn test_template_seeds_unit_checklist() {
    let ws = Workspace::new();
    ws.cmd().args(["templates", "add", "Padrão"]).assert().success();
    ws.cmd()
        .args(["templates", "add-item", "Padrão", "Filtro de água", "--category", "area-gourmet"])
        .assert()
        .success();
    ws.cmd()
        .args(["templates", "add-item", "Padrão", "Cloro"])
        .assert()
        .success();
    ws.cmd()
        .args(["templates", "edit-item", "Padrão", "2", "Cloro da piscina"])
        .assert()
        .success();
    ws.cmd()
        .args(["templates", "remove-item", "Padrão", "3"])
        .assert()
        .failure();

    let unit = ws.json(&["units", "add", "Chalé 2", "--template", "Padrão"]);
    let tasks = unit["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Filtro de água");
    assert_eq!(tasks[0]["category"], "ÁREA GOURMET");
    assert_eq!(tasks[1]["title"], "Cloro da piscina");
    assert!(tasks.iter().all(|t| t["status"] == "PENDENTE"));
}

#[test]
fn test_suggest_adds_four_tasks() {
    let ws = Workspace::new();
    ws.cmd().args(["units", "add", "3"]).assert().success();
    let added = ws.json(&["tasks", "suggest", "3"]);
    let added = added.as_array().unwrap();
    assert_eq!(added.len(), 4);
    assert!(added.iter().all(|t| t["category"] == "AI_SUGGESTION"));
}

#[test]
fn test_login_and_logout() {
    let ws = Workspace::new();
    let op = ws.json(&["login", "Ana", "--role", "reception"]);
    assert_eq!(op["role"], "RECEPTION");
    assert!(exists(&ws.data_dir().join("user.json")));

    ws.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("logged out Ana"));
    assert!(!exists(&ws.data_dir().join("user.json")));

    ws.cmd()
        .args(["login", "Ana", "--role", "chef"])
        .assert()
        .failure();
}

#[test]
fn test_check_in_and_out() {
    let ws = Workspace::new();
    ws.write_config();
    ws.cmd().args(["units", "add", "101"]).assert().success();
    ws.cmd().args(["tasks", "add", "101", "Toalhas"]).assert().success();

    ws.check_in("101", "529.982.247-25")
        .success()
        .stdout(contains("checked in Maria Souza to 101"));
    assert!(exists(&ws.report_dir().join("vistoria_entrada_101.pdf.json")));

    let unit = ws.json(&["units", "show", "101"]);
    assert_eq!(unit["status"], "OCCUPIED");
    let guest = &unit["currentGuest"];
    assert_eq!(guest["name"], "Maria Souza");
    assert!(guest["documentPhotoUri"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert!(guest["facePhotoUri"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));

    let stats = ws.json(&["dashboard"]);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["occupied"], 1);
    assert_eq!(stats["occupancyRate"], 100);

    // occupied units refuse a second guest
    ws.check_in("101", VALID_CPF).failure();

    ws.cmd().args(["tasks", "toggle", "101", "1"]).assert().success();
    let out = ws.json(&["check-out", "101"]);
    assert_eq!(out["unit"], "101");
    assert!(out["guest"]["checkOutDate"].is_number());
    assert!(out["guest"]["checkOutTime"].is_string());
    assert!(exists(&ws.report_dir().join("vistoria_saida_101.pdf.json")));

    let unit = ws.json(&["units", "show", "101"]);
    assert_eq!(unit["status"], "AVAILABLE");
    assert!(unit.get("currentGuest").is_none());
    assert_eq!(unit["tasks"][0]["status"], "PENDENTE");

    ws.cmd()
        .args(["check-out", "101"])
        .assert()
        .failure();
}

#[test]
fn test_check_in_rejects_invalid_cpf() {
    let ws = Workspace::new();
    ws.write_config();
    ws.cmd().args(["units", "add", "5"]).assert().success();

    ws.check_in("5", INVALID_CPF).failure().stderr(contains("check-in of 5 failed"));

    let unit = ws.json(&["units", "show", "5"]);
    assert_eq!(unit["status"], "AVAILABLE");
    assert!(!exists(&ws.report_dir().join("vistoria_entrada_5.pdf.json")));
}

#[test]
fn test_check_in_missing_photo() {
    let ws = Workspace::new();
    ws.write_config();
    ws.cmd().args(["units", "add", "5"]).assert().success();
    ws.cmd()
        .args(["check-in", "5", "--name", "Maria", "--cpf", VALID_CPF])
        .arg("--document-photo")
        .arg(ws.dir.path().join("missing.png"))
        .arg("--face-photo")
        .arg(ws.dir.path().join("missing.png"))
        .assert()
        .failure();

    let unit = ws.json(&["units", "show", "5"]);
    assert_eq!(unit["status"], "AVAILABLE");
}

#[test]
fn test_text_report() {
    let ws = Workspace::new();
    ws.write_config();
    ws.cmd().args(["units", "add", "Casa 1"]).assert().success();
    ws.cmd().args(["tasks", "add", "Casa 1", "Janelas"]).assert().success();

    ws.cmd().args(["tasks", "add", "Casa 1", "Portas"]).assert().success();
    ws.cmd().args(["tasks", "toggle", "Casa 1", "2"]).assert().success();

    let out = ws
        .cmd()
        .args(["report", "text", "Casa 1", "--stdout"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let body = String::from_utf8(out.stdout).unwrap();
    let (dated, undated): (Vec<&str>, Vec<&str>) = body
        .lines()
        .partition(|line| line.starts_with("DATA DE EMISSÃO: "));
    assert_eq!(dated.len(), 1);
    assert_eq!(
        undated,
        vec![
            "RELATÓRIO DE VISTORIA - SITIO RECANTO DA LIMEIRA",
            "UNIDADE: Casa 1 | TIPO: Padrão",
            "STATUS ATUAL: Disponível",
            "==========================================",
            "",
            "CHECKLIST DETALHADO:",
            "[PENDENTE]  Janelas",
            "[CONCLUÍDO] Portas",
            "",
            "==========================================",
            "InnCheck Intelligent System",
        ]
    );

    let path = ws.json(&["report", "text", "Casa 1"]);
    let path = PathBuf::from(path.as_str().unwrap());
    assert!(path.starts_with(ws.report_dir()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("vistoria_casa_1_"));
    assert!(name.ends_with(".txt"));
}

#[test]
fn test_pdf_report_requires_guest() {
    let ws = Workspace::new();
    ws.write_config();
    ws.cmd().args(["units", "add", "9"]).assert().success();
    ws.cmd()
        .args(["report", "pdf", "9"])
        .assert()
        .failure();
}

#[test]
fn test_share_summary() {
    let ws = Workspace::new();
    ws.cmd().args(["units", "add", "12"]).assert().success();
    ws.cmd().args(["tasks", "add", "12", "a"]).assert().success();
    ws.cmd().args(["tasks", "add", "12", "b"]).assert().success();
    ws.cmd().args(["tasks", "toggle", "12", "2"]).assert().success();
    ws.cmd()
        .args(["share", "12"])
        .assert()
        .success()
        .stdout(contains("50% (1/2 itens)"));
}

#[test]
fn test_json_errors_are_reported_on_stdout() {
    let ws = Workspace::new();
    let out = ws
        .cmd()
        .args(["--json", "units", "show", "nope"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let doc: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["ok"], false);
    assert!(doc["error"].is_string());
}

#[test]
fn test_read_only_commands_leave_no_state() {
    let ws = Workspace::new();
    ws.cmd().arg("dashboard").assert().success().stdout(contains("units: 0"));
    assert!(!exists(&ws.data_dir()));
}
