use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use std::io::Write;

use super::*;
use crate::solver::core::traits::InfoPrint;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

impl<T> InfoPrint<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type SE = DefaultSettings<T>;

    fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        data: &DefaultProblemData<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        if data.presolver.is_reduced() {
            writeln!(
                out,
                "\npresolve: removed {} dependent equality constraints, max inconsistency = {}",
                data.presolver.count_reduced(),
                expformat!("{:.2e}", data.presolver.max_inconsistency())
            )?;
        }
        if data.presolver.is_infeasible() {
            writeln!(out, "presolve: equality constraints are inconsistent")?;
        }

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", data.n)?;
        writeln!(out, "  equalities    = {}", data.p)?;
        writeln!(out, "  inequalities  = {}", data.m)?;
        writeln!(
            out,
            "  objective     = {}",
            if data.Q.is_some() { "quadratic" } else { "linear" }
        )?;
        writeln!(out,)?;

        self.print_settings(settings)?;

        std::io::Result::Ok(())
    }

    fn print_status_header(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        //print a subheader for the iterations info
        write!(out, "iter    ")?;
        write!(out, "pcost        ")?;
        write!(out, "pres      ")?;
        write!(out, "dres      ")?;
        write!(out, "gap       ")?;
        write!(out, "merit     ")?;
        write!(out, "σ         ")?;
        write!(out, "step      ")?;
        writeln!(out,)?;
        writeln!(
            out,
            "-------------------------------------------------------------------------------"
        )?;
        out.flush()?;
        std::io::Result::Ok(())
    }

    fn print_status(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        write!(out, "{:>3}  ", self.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.gap))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.merit))?;

        if self.iterations > 0 {
            write!(out, "{}  ", expformat!("{:6.2e}", self.sigma))?;
            write!(out, "{}  ", expformat!("{:>.2e}", self.step_length))?;
        } else {
            write!(out, " ------    ")?; //info.sigma
            write!(out, " ------   ")?; //info.step_length
        }

        writeln!(out,)?;

        std::io::Result::Ok(())
    }

    fn print_footer(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(
            out,
            "-------------------------------------------------------------------------------"
        )?;

        writeln!(out, "Terminated with status = {}", self.status)?;

        writeln!(
            out,
            "kkt: {} factorizations, {} solves, rcond = {}",
            self.kkt.factorizations,
            self.kkt.solves,
            expformat!("{:.2e}", self.kkt.rcond)
        )?;

        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;

        std::io::Result::Ok(())
    }

    fn print_target(&mut self) -> &mut dyn std::io::Write {
        &mut self.stream
    }
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    fn print_settings(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        let out = &mut self.stream;

        let set = settings;

        writeln!(out, "settings:")?;

        writeln!(
            out,
            "  linear algebra: dense LDL, precision: {} bit",
            _get_precision_string::<T>()
        )?;

        writeln!(
            out,
            "  max iter = {}, tol = {:.1e}, s0 = {:.3}",
            set.max_iter, set.tol, set.s0
        )?;

        writeln!(
            out,
            "  line search: max iter = {}, β = {:.2}, α = {:.1e}",
            set.max_lsearch_iter, set.beta, set.alpha
        )?;

        writeln!(
            out,
            "  presolve   : {}, rank tol = {:.1e}, consistency tol = {:.1e}",
            _bool_on_off(set.presolve_enable),
            set.presolve_rank_tol,
            set.presolve_consistency_tol
        )?;

        writeln!(
            out,
            "  static reg : {}, ϵ1 = {:.1e}, ϵ2 = {:.1e}",
            _bool_on_off(set.static_regularization_enable),
            set.static_regularization_constant,
            set.static_regularization_proportional,
        )?;

        writeln!(
            out,
            "  dynamic reg: {}, ϵ = {:.1e}, δ = {:.1e}",
            _bool_on_off(set.dynamic_regularization_enable),
            set.dynamic_regularization_eps,
            set.dynamic_regularization_delta
        )?;

        writeln!(
            out,
            "  iter refine: {}, reltol = {:.1e}, abstol = {:.1e},",
            _bool_on_off(set.iterative_refinement_enable),
            set.iterative_refinement_reltol,
            set.iterative_refinement_abstol
        )?;

        writeln!(
            out,
            "               max iter = {}, stop ratio = {:.1}",
            set.iterative_refinement_max_iter, set.iterative_refinement_stop_ratio
        )?;

        writeln!(
            out,
            "  equilibrate: {}, min_scale = {:.1e}, max_scale = {:.1e}",
            _bool_on_off(set.equilibrate_enable),
            set.equilibrate_min_scaling,
            set.equilibrate_max_scaling
        )?;

        writeln!(
            out,
            "               max iter = {}",
            set.equilibrate_max_iter,
        )?;

        writeln!(out,)?;

        std::io::Result::Ok(())
    }
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let eidx = match thestr.find('e') {
        Some(idx) => idx,
        None => return thestr,
    };
    let has_sign = thestr.chars().nth(eidx + 1) == Some('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars;
    if !has_sign {
        if has_short_exp {
            chars = "+0";
        } else {
            chars = "+";
        }
    } else if has_short_exp {
        chars = "0";
    } else {
        chars = "";
    }

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}
