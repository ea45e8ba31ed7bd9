//! Built-in catalog of solver template classes.
//!
//! Grouped roughly the way the classes are nested in a program: runnable
//! drivers first, then time stepping, spatial discretization and the leaf
//! building blocks (meshes, basis functions, quadratures, equations).

use super::{ClassSpec, ROOT_NAME};
use crate::settings::Container;
use crate::settings::builder::{
    child, choice, dict, entry, entry_with_comment, list, list_entry, mesh, solver,
};
use crate::settings::Item;

const DIMENSIONS: &[&str] = &["1", "2", "3"];

pub(super) fn specs() -> Vec<ClassSpec> {
    let mut specs = vec![global()];
    specs.extend(postprocessing());
    specs.extend(precice_adapters());
    specs.extend(muscle_solvers());
    specs.extend(control());
    specs.extend(operator_splitting());
    specs.extend(cellml_and_model_order_reduction());
    specs.extend(time_stepping());
    specs.extend(specialized_solvers());
    specs.extend(spatial_discretization());
    specs.extend(meshes());
    specs.extend(basis_functions());
    specs.extend(quadratures());
    specs.extend(equations());
    specs
}

fn global() -> ClassSpec {
    ClassSpec::new(ROOT_NAME).defaults(dict([
        entry("scenarioName", "\"test-scenario\""),
        entry_with_comment("logFormat", "\"csv\"", "csv or json"),
        entry("solverStructureDiagramFile", "\"solver_structure.txt\""),
        entry(
            "mappingsBetweenMeshesLogFile",
            "\"mappings_between_meshes.txt\"",
        ),
        entry("MappingsBetweenMeshes", "{}"),
        entry("meta", dict([entry("partitioning", "\"\"")])),
        child(0),
    ]))
}

// ============================================================================
// SHARED FRAGMENTS
// ============================================================================

/// `{"<key>": {timeStepWidth, endTime, ..., <extra>}}`
fn timestepped(key: &str, extra: Vec<Item>) -> Container {
    let mut items = vec![
        entry("timeStepWidth", "1e-1"),
        entry("endTime", "10.0"),
        entry("timeStepOutputInterval", "100"),
    ];
    items.extend(extra);
    dict([entry(key, dict(items))])
}

fn linear_solver(solver_type: &str, preconditioner: &str) -> Item {
    solver(vec![
        entry("solverType", format!("\"{solver_type}\"")),
        entry("preconditionerType", format!("\"{preconditioner}\"")),
        entry("relativeTolerance", "1e-5"),
        entry("absoluteTolerance", "1e-10"),
        entry("maxIterations", "1e4"),
        entry_with_comment("dumpFilename", "\"\"", "no filename means dump is disabled"),
        entry("dumpFormat", "\"default\""),
    ])
}

fn precice_adapter(participant: &str) -> Container {
    dict([entry(
        "PreciceAdapter",
        dict([
            entry("timeStepOutputInterval", "100"),
            entry("timestepWidth", "1e-2"),
            entry("preciceConfigFilename", "\"precice_config.xml\""),
            entry("preciceParticipantName", format!("\"{participant}\"")),
            entry("scalingFactor", "1"),
            entry("outputOnlyConvergedTimeSteps", "True"),
            entry("preciceMeshes", "[]"),
            entry("preciceData", "[]"),
            child(0),
        ]),
    )])
}

fn term(key: &str, slot: usize) -> Item {
    entry(key, dict([child(slot)]))
}

fn optional_term(key: &str, slot: usize) -> Item {
    choice(vec![], vec![term(key, slot)])
}

// ============================================================================
// RUNNABLE DRIVERS
// ============================================================================

fn postprocessing() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("Postprocessing::ParallelFiberEstimation")
            .runnable()
            .slot("basis function of the fiber mesh", &["BasisFunction::"])
            .defaults(dict([entry(
                "ParallelFiberEstimation",
                dict([
                    entry("inputMeshFilename", "\"meshes/biceps.stl\""),
                    entry("resultFilename", "\"result.bin\""),
                    entry("waitIfFileGetsBig", "False"),
                    entry("improveMesh", "True"),
                    entry("level", "0"),
                    entry("maxLevel", "2"),
                    entry("nBorderPointsX", "4"),
                    entry("nBorderPointsZ", "4"),
                    entry("nFineGridFibers", "0"),
                    entry("lineStepWidth", "1e-2"),
                    linear_solver("gmres", "none"),
                ]),
            )])),
        ClassSpec::new("Postprocessing::StreamlineTracer")
            .runnable()
            .slot("potential flow problem to trace", &["discretizableInTime"])
            .defaults(dict([entry(
                "StreamlineTracer",
                dict([
                    entry("seedPoints", "[]"),
                    entry("lineStepWidth", "1e-2"),
                    entry("maxNIterations", "1e5"),
                    entry("useGradientField", "False"),
                    entry("csvFilename", "\"fibers.csv\""),
                    child(0),
                ]),
            )])),
    ]
}

fn precice_adapters() -> Vec<ClassSpec> {
    let adapter = |name: &str, participant: &str, description: &str, items: &[&str]| {
        ClassSpec::new(name)
            .runnable()
            .slot(description, items)
            .defaults(precice_adapter(participant))
    };
    vec![
        adapter(
            "PreciceAdapter::ContractionDirichletBoundaryConditions",
            "MuscleSolver",
            "coupled time stepping scheme",
            &["timeSteppingScheme"],
        ),
        adapter(
            "PreciceAdapter::ContractionNeumannBoundaryConditions",
            "TendonSolver",
            "coupled time stepping scheme",
            &["timeSteppingScheme"],
        ),
        adapter(
            "PreciceAdapter::PartitionedFibers",
            "PartitionedFibers",
            "coupled time stepping scheme",
            &["timeSteppingScheme"],
        ),
        adapter(
            "PreciceAdapter::MuscleContraction",
            "MuscleContraction",
            "muscle contraction solver",
            &["MuscleContractionSolver"],
        ),
    ]
}

fn muscle_solvers() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("MuscleContractionSolver")
            .runnable()
            .time_stepping_scheme()
            .needed(0)
            .slot("deformable mesh", &["Mesh::"])
            .defaults(dict([entry(
                "MuscleContractionSolver",
                dict([
                    entry("numberTimeSteps", "1"),
                    entry("timeStepOutputInterval", "10"),
                    entry("Pmax", "7.3"),
                    entry("slotNames", "[]"),
                    entry("dynamic", "True"),
                    entry("enableForceLengthRelation", "True"),
                    entry("lambdaDotScalingFactor", "1.0"),
                    child(0),
                ]),
            )])),
        ClassSpec::new("FastMonodomainSolver")
            .runnable()
            .time_stepping_scheme()
            .slot("fiber instances", &["Control::MultipleInstances"])
            .defaults(dict([
                entry("fiberDistributionFile", "\"MU_fibre_distribution.txt\""),
                entry("firingTimesFile", "\"MU_firing_times_always.txt\""),
                entry("onlyComputeIfHasBeenStimulated", "True"),
                entry("disableComputationWhenStatesAreCloseToEquilibrium", "True"),
                entry("valueForStimulatedPoint", "20.0"),
                entry("neuromuscularJunctionRelativeSize", "0.1"),
                child(0),
            ])),
        ClassSpec::new("SpatialDiscretization::HyperelasticitySolver")
            .runnable()
            .time_stepping_scheme()
            .needed(0)
            .slot(
                "material model",
                &["Equation::SolidMechanics::TransverselyIsotropicMooneyRivlinIncompressible3D"],
            )
            .defaults(dict([entry(
                "HyperelasticitySolver",
                dict([
                    entry("durationLogKey", "\"nonlinear\""),
                    entry("materialParameters", "[]"),
                    entry("displacementsScalingFactor", "1.0"),
                    entry("residualNormLogFilename", "\"log_residual_norm.txt\""),
                    entry("useAnalyticJacobian", "True"),
                    entry("useNumericJacobian", "False"),
                    entry("dumpDenseMatlabVariables", "False"),
                    entry("loadFactors", "[]"),
                    entry("nNonlinearSolveCalls", "1"),
                    entry("inputMeshIsGlobal", "True"),
                    entry("dirichletBoundaryConditions", "{}"),
                    entry("neumannBoundaryConditions", "[]"),
                    linear_solver("preonly", "lu"),
                    entry("OutputWriter", "[]"),
                ]),
            )])),
    ]
}

fn control() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("Control::MultipleInstances")
            .runnable()
            .time_stepping_scheme()
            .slot("scheme run by every instance", &["timeSteppingScheme"])
            .defaults(dict([entry(
                "MultipleInstances",
                dict([
                    entry("nInstances", "1"),
                    entry(
                        "instances",
                        list([list_entry(dict([
                            entry("ranks", "list(range(4))"),
                            child(0),
                        ]))]),
                    ),
                ]),
            )])),
        ClassSpec::new("Control::Coupling")
            .runnable()
            .time_stepping_scheme()
            .slot("first coupled scheme", &["timeSteppingScheme"])
            .slot("second coupled scheme", &["timeSteppingScheme"])
            .defaults(timestepped(
                "Coupling",
                vec![
                    entry("connectedSlotsTerm1To2", "[0]"),
                    entry("connectedSlotsTerm2To1", "[0]"),
                    term("Term1", 0),
                    term("Term2", 1),
                ],
            )),
        ClassSpec::new("Control::LoadBalancing")
            .runnable()
            .time_stepping_scheme()
            .slot("balanced time stepping scheme", &["timeSteppingScheme"])
            .defaults(timestepped("LoadBalancing", vec![child(0)])),
        ClassSpec::new("Control::MapDofs")
            .runnable()
            .time_stepping_scheme()
            .slot("function space of the mapped dofs", &["FunctionSpace::"])
            .slot("nested time stepping scheme", &["timeSteppingScheme"])
            .defaults(dict([entry(
                "MapDofs",
                dict([
                    entry("nAdditionalFieldVariables", "0"),
                    entry("additionalSlotNames", "[]"),
                    entry("beforeComputation", "[]"),
                    entry("afterComputation", "[]"),
                    child(0),
                    child(1),
                ]),
            )])),
    ]
}

fn operator_splitting() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("OperatorSplitting::Strang")
            .runnable()
            .time_stepping_scheme()
            .slot("first split term", &["timeSteppingScheme"])
            .slot("second split term", &["timeSteppingScheme"])
            .defaults(dict([entry(
                "StrangSplitting",
                dict([
                    entry("timeStepWidth", "1e-1"),
                    entry("endTime", "1000.0"),
                    term("Term1", 0),
                    term("Term2", 1),
                    optional_term("Term3", 2),
                    optional_term("Term4", 3),
                    optional_term("Term5", 4),
                ]),
            )])),
        ClassSpec::new("OperatorSplitting::Godunov")
            .runnable()
            .time_stepping_scheme()
            .slot("first split term", &["timeSteppingScheme"])
            .slot("second split term", &["timeSteppingScheme"])
            .defaults(timestepped(
                "GodunovSplitting",
                vec![
                    entry("connectedSlotsTerm1To2", "[0]"),
                    entry("connectedSlotsTerm2To1", "[0]"),
                    term("Term1", 0),
                    term("Term2", 1),
                ],
            )),
    ]
}

fn cellml_and_model_order_reduction() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("CellmlAdapter")
            .discretizable_in_time()
            .needed(1)
            .slot("number of states", &["Integer"])
            .slot("number of algebraics", &["Integer"])
            .slot("function space", &["FunctionSpace::"])
            .defaults(dict([entry(
                "CellML",
                dict([
                    entry("modelFilename", "\"\""),
                    entry("libraryFilename", "None"),
                    entry("statesInitialValues", "\"CellML\""),
                    entry("initializeStatesToEquilibrium", "False"),
                    entry("parametersUsedAsAlgebraic", "[]"),
                    entry("parametersUsedAsConstant", "[]"),
                    entry("parametersInitialValues", "[]"),
                    entry("setSpecificStatesFunction", "None"),
                    entry("setSpecificParametersFunction", "None"),
                    entry("algebraicsForTransfer", "[]"),
                    entry("statesForTransfer", "[]"),
                    child(2),
                ]),
            )])),
        ClassSpec::new("ModelOrderReduction::POD")
            .discretizable_in_time()
            .slot("full order model", &["discretizableInTime"])
            .slot("linear part", &["ModelOrderReduction::LinearPart"])
            .defaults(dict([entry(
                "ModelOrderReduction",
                dict([
                    entry("nReducedBases", "10"),
                    entry("nRowsSnapshots", "100"),
                    entry("snapshots", "\"snapshots.csv\""),
                    child(0),
                ]),
            )])),
        ClassSpec::new("ModelOrderReduction::LinearPart"),
        ClassSpec::new("ModelOrderReduction::ExplicitEulerReduced")
            .time_stepping_scheme()
            .slot("full order scheme", &["TimeSteppingScheme::ExplicitEuler"])
            .defaults(timestepped("ExplicitEulerReduced", vec![child(0)])),
        ClassSpec::new("ModelOrderReduction::ImplicitEulerReduced")
            .time_stepping_scheme()
            .slot("full order scheme", &["TimeSteppingScheme::ImplicitEuler"])
            .defaults(timestepped("ImplicitEulerReduced", vec![child(0)])),
    ]
}

// ============================================================================
// TIME STEPPING
// ============================================================================

fn time_stepping() -> Vec<ClassSpec> {
    let scheme = |class: &str, key: &str, mut extra: Vec<Item>| {
        extra.push(child(0));
        ClassSpec::new(&format!("TimeSteppingScheme::{class}"))
            .runnable()
            .time_stepping_scheme()
            .slot("problem discretizable in time", &["discretizableInTime"])
            .defaults(timestepped(key, extra))
    };

    vec![
        scheme("ExplicitEuler", "ExplicitEuler", vec![]),
        scheme(
            "ImplicitEuler",
            "ImplicitEuler",
            vec![linear_solver("gmres", "none")],
        ),
        ClassSpec::new("TimeSteppingScheme::Heun")
            .runnable()
            .time_stepping_scheme()
            .slot("problem discretizable in time", &["discretizableInTime"])
            .defaults(dict([entry(
                "Heun",
                dict([
                    entry("endTime", "1"),
                    entry("timeStepWidth", "0.001"),
                    entry("numberTimeSteps", "10"),
                    child(0),
                ]),
            )])),
        scheme(
            "HeunAdaptive",
            "HeunAdaptive",
            vec![
                entry("tolerance", "0.1"),
                entry("minTimeStepWidth", "1e-6"),
                entry("timeStepAdaptOption", "\"regular\""),
            ],
        ),
        ClassSpec::new("TimeSteppingScheme::CrankNicolson")
            .time_stepping_scheme()
            .slot("problem discretizable in time", &["discretizableInTime"])
            .defaults(timestepped(
                "CrankNicolson",
                vec![linear_solver("gmres", "none"), child(0)],
            )),
        ClassSpec::new("TimeSteppingScheme::RepeatedCall")
            .runnable()
            .time_stepping_scheme()
            .slot("repeated time stepping scheme", &["timeSteppingScheme"])
            .defaults(timestepped("RepeatedCall", vec![child(0)])),
        ClassSpec::new("TimeSteppingScheme::RepeatedCallStatic")
            .runnable()
            .time_stepping_scheme()
            .slot(
                "repeated static problem",
                &["SpatialDiscretization::FiniteElementMethod"],
            )
            .defaults(timestepped("RepeatedCallStatic", vec![child(0)])),
    ]
}

fn specialized_solvers() -> Vec<ClassSpec> {
    const FEM: &[&str] = &["SpatialDiscretization::FiniteElementMethod"];
    let solver_class = |class: &str| {
        ClassSpec::new(&format!("TimeSteppingScheme::{class}"))
            .runnable()
            .time_stepping_scheme()
    };

    vec![
        solver_class("DynamicHyperelasticitySolver")
            .needed(0)
            .slot("material model", &["Equation::"])
            .slot("mesh", &["Mesh::StructuredRegularFixedOfDimension"])
            .defaults(timestepped(
                "DynamicHyperelasticitySolver",
                vec![
                    entry("durationLogKey", "\"nonlinear\""),
                    entry("materialParameters", "[]"),
                    entry("density", "1.0"),
                    entry("inputMeshIsGlobal", "True"),
                    linear_solver("preonly", "lu"),
                    child(1),
                ],
            )),
        solver_class("StaticBidomainSolver")
            .slot("potential flow problem", FEM)
            .slot("activation problem", FEM)
            .defaults(timestepped(
                "StaticBidomainSolver",
                vec![
                    entry("durationLogKey", "\"duration_bidomain\""),
                    linear_solver("gmres", "none"),
                    term("PotentialFlow", 0),
                    term("Activation", 1),
                ],
            )),
        solver_class("MultidomainSolver")
            .slot("potential flow problem", FEM)
            .slot("activation problem", FEM)
            .defaults(timestepped(
                "MultidomainSolver",
                vec![
                    entry("nCompartments", "1"),
                    entry("am", "500.0"),
                    entry("cm", "0.58"),
                    entry("initialGuessNonzero", "True"),
                    entry("enableFatComputation", "False"),
                    linear_solver("gmres", "none"),
                    term("PotentialFlow", 0),
                    term("Activation", 1),
                ],
            )),
        solver_class("MultidomainWithFatSolver")
            .slot("potential flow problem", FEM)
            .slot("activation problem", FEM)
            .slot("fat layer problem", FEM)
            .defaults(dict([entry(
                "MultidomainSolver",
                dict([
                    term("PotentialFlow", 0),
                    term("Activation", 1),
                    term("Fat", 2),
                ]),
            )])),
        solver_class("QuasiStaticNonlinearElasticitySolverFebio").defaults(dict([entry(
            "QuasiStaticNonlinearElasticitySolverFebio",
            dict([
                entry("durationLogKey", "\"febio\""),
                entry("force", "100.0"),
                entry("materialParameters", "[]"),
            ]),
        )])),
        solver_class("NonlinearElasticitySolverFebio").defaults(dict([entry(
            "NonlinearElasticitySolverFebio",
            dict([
                entry("durationLogKey", "\"febio\""),
                entry("tractionVector", "[0, 0, 1]"),
                entry("materialParameters", "[]"),
            ]),
        )])),
        solver_class("QuasiStaticLinearElasticitySolver")
            .slot("linear elasticity problem", FEM)
            .defaults(dict([entry(
                "QuasiStaticLinearElasticitySolver",
                dict([
                    entry("maxActiveStress", "1.0"),
                    entry("strainScalingCurveWidth", "1.0"),
                    entry("scalingFactor", "1.0"),
                    entry("inputMeshIsGlobal", "True"),
                    entry("fiberDirection", "[0, 0, 1]"),
                    child(0),
                ]),
            )])),
        solver_class("QuasiStaticNonlinearElasticitySolverChaste")
            .slot("dimension", &["Integer"])
            .defaults(dict([entry(
                "QuasiStaticNonlinearElasticitySolverChaste",
                dict([entry("maximumActiveStress", "1.0"), entry("slotNames", "[]")]),
            )])),
        ClassSpec::new("PrescribedValues")
            .runnable()
            .time_stepping_scheme()
            .needed(1)
            .slot("function space", &["FunctionSpace::FunctionSpace"])
            .slot("components of the first field variable", DIMENSIONS)
            .slot("components of the second field variable", DIMENSIONS)
            .defaults(dict([entry(
                "PrescribedValues",
                dict([
                    entry("fieldVariables1", "[]"),
                    entry("fieldVariables2", "[]"),
                    entry("additionalFieldVariables", "[]"),
                    child(0),
                ]),
            )])),
        ClassSpec::new("OutputWriter::OutputSurface")
            .runnable()
            .time_stepping_scheme()
            .slot(
                "scheme whose surface is written",
                &["timeSteppingScheme", "SpatialDiscretization::FiniteElementMethod"],
            )
            .defaults(dict([entry(
                "OutputSurface",
                dict([entry("face", "[\"1-\"]"), child(0)]),
            )])),
    ]
}

// ============================================================================
// SPATIAL DISCRETIZATION
// ============================================================================

fn spatial_discretization() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("FunctionSpace::FunctionSpace")
            .slot("mesh", &["Mesh::"])
            .slot("basis function", &["BasisFunction::"])
            .defaults(dict([child(0)])),
        ClassSpec::new("SpatialDiscretization::FiniteElementMethod")
            .runnable()
            .discretizable_in_time()
            .slot("mesh", &["Mesh::"])
            .slot("basis function", &["BasisFunction::"])
            .slot("quadrature", &["Quadrature::"])
            .slot("equation", &["Equation::"])
            .defaults(dict([entry(
                "FiniteElementMethod",
                dict([
                    child(0),
                    entry("prefactor", "1"),
                    entry("rightHandSide", "{}"),
                    entry("dirichletBoundaryConditions", "{}"),
                    entry("dirichletOutputFilename", "None"),
                    entry("neumannBoundaryConditions", "[]"),
                    entry("updatePrescribedValuesFromSolution", "False"),
                    entry("inputMeshIsGlobal", "True"),
                    linear_solver("gmres", "none"),
                    choice(vec![], vec![entry("diffusionTensor", "[]")]),
                ]),
            )])),
    ]
}

fn meshes() -> Vec<ClassSpec> {
    let n_elements = || entry("nElements", list([list_entry("0"), list_entry("1")]));
    vec![
        ClassSpec::new("Mesh::StructuredRegularFixedOfDimension")
            .slot("dimension", DIMENSIONS)
            .defaults(dict([mesh(vec![
                n_elements(),
                entry("physicalExtent", "[1.0, 1.0]"),
                entry("inputMeshIsGlobal", "True"),
            ])])),
        ClassSpec::new("Mesh::StructuredDeformableOfDimension")
            .slot("dimension", DIMENSIONS)
            .defaults(dict([mesh(vec![
                n_elements(),
                entry("inputMeshIsGlobal", "True"),
                choice(
                    vec![
                        entry("physicalExtent", "[2.5, 5.0]"),
                        entry("physicalOffset", "[0.5, 0.0]"),
                    ],
                    vec![entry("nodePositions", "[[0,0,0], [0,0,0]]")],
                ),
            ])])),
        ClassSpec::new("Mesh::UnstructuredDeformableOfDimension")
            .slot("dimension", DIMENSIONS)
            .defaults(dict([mesh(vec![
                entry("elements", "[]"),
                entry("nodePositions", "[]"),
            ])])),
        ClassSpec::new("Mesh::CompositeOfDimension").slot("dimension", DIMENSIONS),
    ]
}

fn basis_functions() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("BasisFunction::CompletePolynomialOfDimensionAndOrder")
            .slot("dimension", DIMENSIONS)
            .slot("order", &["0", "1", "2"]),
        ClassSpec::new("BasisFunction::Hermite"),
        ClassSpec::new("BasisFunction::LagrangeOfOrder")
            .needed(0)
            .slot("order", &["1", "2"]),
    ]
}

fn quadratures() -> Vec<ClassSpec> {
    vec![
        ClassSpec::new("Quadrature::None"),
        ClassSpec::new("Quadrature::ClenshawCurtis")
            .slot("number of points", &["1", "2", "3", "4", "5", "6", "7", "64"]),
        ClassSpec::new("Quadrature::Gauss").slot(
            "number of points",
            &[
                "1", "2", "3", "4", "5", "6", "7", "8", "10", "12", "16", "20", "24", "64",
            ],
        ),
        ClassSpec::new("Quadrature::NewtonCotes")
            .slot("number of points", &["1", "2", "3", "4", "5", "6", "7", "8"]),
        ClassSpec::new("Quadrature::TensorProduct")
            .slot("dimension", DIMENSIONS)
            .slot("one dimensional quadrature", &["Quadrature::"]),
    ]
}

fn equations() -> Vec<ClassSpec> {
    [
        "Equation::Dynamic::IsotropicDiffusion",
        "Equation::Dynamic::AnisotropicDiffusion",
        "Equation::Dynamic::DirectionalDiffusion",
        "Equation::Static::Laplace",
        "Equation::Static::GeneralizedLaplace",
        "Equation::Static::LinearElasticity",
        "Equation::Static::LinearElasticityActiveStress",
        "Equation::SolidMechanics::MooneyRivlinIncompressible3D",
        "Equation::SolidMechanics::TransverselyIsotropicMooneyRivlinIncompressible3D",
        "Equation::SolidMechanics::TransverselyIsotropicMooneyRivlinIncompressibleActive3D",
        "Equation::SolidMechanics::HyperelasticTendon",
        "Equation::SolidMechanics::HyperelasticityBase",
        "Equation::Static::Poisson",
        "Equation::Static::GeneralizedPoisson",
    ]
    .into_iter()
    .map(ClassSpec::new)
    .collect()
}
